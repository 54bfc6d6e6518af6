//! UTS namespace isolation.
//!
//! Allows the isolated process to have its own hostname.

use nsroot_common::error::{NsrootError, Result};

/// Sets the hostname inside the current UTS namespace.
///
/// Only call this after entering a new UTS namespace, or the host's
/// hostname changes.
///
/// # Errors
///
/// Returns an error if `sethostname(2)` fails.
pub fn set_hostname(hostname: &str) -> Result<()> {
    nix::unistd::sethostname(hostname).map_err(|e| NsrootError::Namespace {
        message: format!("sethostname({hostname}) failed: {e}"),
    })?;
    tracing::debug!(hostname, "hostname set");
    Ok(())
}
