//! Isolation configuration shared by both launch phases.

use std::path::{Component, PathBuf};

use crate::error::{NsrootError, Result};
use crate::types::NamespaceSet;

/// Tunables for one isolated launch.
///
/// The defaults reproduce the plain `run <command>` behaviour: a `rootfs`
/// directory in the current working directory, UTS + PID + mount
/// namespaces, no hostname change and no `/proc` mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationConfig {
    /// Directory that becomes `/` inside the isolated process.
    pub rootfs: PathBuf,
    /// Name of the holding directory for the previous root, inside `rootfs`.
    pub old_root: PathBuf,
    /// Namespaces requested at process creation.
    pub namespaces: NamespaceSet,
    /// Hostname to set inside the new UTS namespace.
    pub hostname: Option<String>,
    /// Mount a fresh `proc` at `/proc` after the root switch.
    pub mount_proc: bool,
}

impl Default for IsolationConfig {
    fn default() -> Self {
        Self {
            rootfs: PathBuf::from(crate::constants::DEFAULT_ROOTFS_DIR),
            old_root: PathBuf::from(crate::constants::OLD_ROOT_DIR),
            namespaces: NamespaceSet::default(),
            hostname: None,
            mount_proc: false,
        }
    }
}

impl IsolationConfig {
    /// Full path of the old-root holding directory before the pivot.
    #[must_use]
    pub fn old_root_path(&self) -> PathBuf {
        self.rootfs.join(&self.old_root)
    }

    /// Checks values that would otherwise only fail deep inside a syscall.
    ///
    /// # Errors
    ///
    /// Returns [`NsrootError::Config`] if
    /// the rootfs path is empty, the holding directory is not a single
    /// relative component, or a hostname is set without a UTS namespace.
    pub fn validate(&self) -> Result<()> {
        if self.rootfs.as_os_str().is_empty() {
            return Err(NsrootError::Config {
                message: "rootfs path is empty".into(),
            });
        }

        let mut components = self.old_root.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(NsrootError::Config {
                    message: format!(
                        "old root holding directory must be a plain name, got {}",
                        self.old_root.display()
                    ),
                });
            }
        }

        if let Some(hostname) = &self.hostname {
            if !self.namespaces.uts {
                return Err(NsrootError::Config {
                    message: "setting a hostname requires a UTS namespace".into(),
                });
            }
            if hostname.is_empty() || hostname.len() > 64 {
                return Err(NsrootError::Config {
                    message: format!("hostname must be 1 to 64 bytes, got {}", hostname.len()),
                });
            }
        }

        Ok(())
    }
}
