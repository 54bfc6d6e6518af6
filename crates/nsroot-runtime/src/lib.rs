//! The two launch phases of nsroot.
//!
//! - [`launcher`] runs with the caller's privileges and namespaces,
//!   re-executes this binary under fresh namespaces and supervises it.
//! - [`bootstrap`] runs as PID 1 inside those namespaces, switches the
//!   root filesystem and hands the process over to the target command.
//!
//! The phases share no state: everything the bootstrap needs travels in
//! its argument vector, built by [`invocation::Invocation::child_args`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod bootstrap;
pub mod invocation;
pub mod launcher;
pub mod status;
