//! Filesystem management for root isolation.
//!
//! Provides the ordered `pivot_root` switch and the mount utilities it is
//! built from.

pub mod mount;
pub mod pivot_root;

pub use pivot_root::{RootOps, RootSwitch, Syscalls};
