//! # nsroot-core
//!
//! Low-level Linux isolation primitives for nsroot.
//!
//! This crate provides safe abstractions over:
//! - **Namespaces**: creating a process under fresh UTS, PID and mount
//!   namespaces in a single `clone(2)`, and setting the isolated hostname.
//! - **Filesystem**: the ordered root switch (`pivot_root(2)`) and the
//!   mount helpers it is built from.
//! - **Exec**: argument conversion and `execvp(2)` hand-off.
//!
//! All unsafe system calls are encapsulated in safe wrappers with
//! proper error handling and `// SAFETY:` documentation.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod exec;
pub mod filesystem;
pub mod namespace;
