//! # nsroot-common
//!
//! Shared error definitions, configuration model, domain types, and
//! constants used across the nsroot workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and carries no syscall code.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
