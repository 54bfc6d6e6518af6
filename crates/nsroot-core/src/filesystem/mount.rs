//! Mount utilities for root filesystem setup.
//!
//! These only make sense inside a private mount namespace; called from the
//! host namespace they change the host's mount table.

use std::io;
use std::path::Path;

use nix::mount::{MsFlags, mount};
use nsroot_common::error::{NsrootError, Result};

/// Recursively marks every mount under `/` as private.
///
/// Stops the following bind mount from propagating to the parent
/// namespace, and lets `pivot_root(2)` succeed on hosts whose root mount
/// is shared.
///
/// # Errors
///
/// Returns the OS error from `mount(2)`.
pub fn make_mounts_private() -> io::Result<()> {
    mount(
        None::<&str>,
        "/",
        None::<&str>,
        MsFlags::MS_REC | MsFlags::MS_PRIVATE,
        None::<&str>,
    )?;
    tracing::debug!("root mount propagation set to private");
    Ok(())
}

/// Bind-mounts `dir` onto itself so it becomes a mount point.
///
/// `pivot_root(2)` requires the new root to be a mount point.
///
/// # Errors
///
/// Returns the OS error from `mount(2)`, e.g. `ENOENT` if `dir` does not
/// exist.
pub fn bind_mount_self(dir: &Path) -> io::Result<()> {
    mount(
        Some(dir),
        dir,
        None::<&str>,
        MsFlags::MS_BIND,
        None::<&str>,
    )?;
    tracing::debug!(dir = %dir.display(), "bind-mounted onto itself");
    Ok(())
}

/// Mounts a fresh `proc` filesystem at `target`.
///
/// Inside a new PID namespace this shows only the namespace's processes.
/// The mount point is created if it is missing.
///
/// # Errors
///
/// Returns [`NsrootError::Io`] if the mount point cannot be created or
/// `mount(2)` fails.
pub fn mount_proc(target: &Path) -> Result<()> {
    std::fs::create_dir_all(target).map_err(|e| NsrootError::Io {
        path: target.to_path_buf(),
        source: e,
    })?;

    mount(
        Some("proc"),
        target,
        Some("proc"),
        MsFlags::MS_NOSUID | MsFlags::MS_NODEV | MsFlags::MS_NOEXEC,
        None::<&str>,
    )
    .map_err(|e| NsrootError::Io {
        path: target.to_path_buf(),
        source: e.into(),
    })?;

    tracing::debug!(target = %target.display(), "proc mounted");
    Ok(())
}
