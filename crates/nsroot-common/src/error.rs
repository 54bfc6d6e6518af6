//! Unified error type for the nsroot workspace.
//!
//! Setup failures that must never be recovered from are still represented
//! here so they can be logged with context; the bootstrap decides which of
//! them end the process unconditionally.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SwitchStage;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NsrootError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Creating the namespaced process failed.
    #[error("namespace setup failed: {message}")]
    Namespace {
        /// Description of the failed operation.
        message: String,
    },

    /// A step of the root switch failed.
    #[error("root switch failed while {stage}: {source}")]
    RootSwitch {
        /// Step that was being attempted.
        stage: SwitchStage,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The target command could not be launched or did not succeed.
    #[error("{command}: {message}")]
    Command {
        /// Command that failed.
        command: String,
        /// How it failed.
        message: String,
    },

    /// An argument cannot be passed to `execve(2)`.
    #[error("argument contains an interior NUL byte: {argument:?}")]
    InvalidArgument {
        /// The offending argument, lossily decoded.
        argument: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, NsrootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_switch_error_names_the_stage() {
        let err = NsrootError::RootSwitch {
            stage: SwitchStage::Pivoted,
            source: std::io::Error::from_raw_os_error(22),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("root switch failed while pivoting root"), "{msg}");
    }

    #[test]
    fn command_error_reads_like_a_diagnostic() {
        let err = NsrootError::Command {
            command: "ls".into(),
            message: "exit status 2".into(),
        };
        assert_eq!(err.to_string(), "ls: exit status 2");
    }
}
