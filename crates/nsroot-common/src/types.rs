//! Domain primitive types used across the nsroot workspace.

use std::fmt;

/// Namespaces requested when the isolated process is created.
///
/// Only hostname, process-ID and mount isolation are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceSet {
    /// Isolate hostname and domain name (UTS).
    pub uts: bool,
    /// Isolate process IDs; the child becomes PID 1.
    pub pid: bool,
    /// Isolate the mount table.
    pub mount: bool,
}

impl Default for NamespaceSet {
    fn default() -> Self {
        Self {
            uts: true,
            pid: true,
            mount: true,
        }
    }
}

impl NamespaceSet {
    /// Returns `true` if no namespace is requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.uts || self.pid || self.mount)
    }
}

impl fmt::Display for NamespaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [(self.uts, "uts"), (self.pid, "pid"), (self.mount, "mnt")]
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}

/// Steps of the isolation bootstrap, in the order they happen.
///
/// Transitions only move forward; a failure at any step aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SwitchStage {
    /// Nothing done yet.
    Start,
    /// Mount propagation of `/` made private.
    MountsPrivate,
    /// The rootfs directory is bind-mounted onto itself.
    BindMounted,
    /// The old-root holding directory exists.
    OldRootCreated,
    /// `pivot_root(2)` succeeded.
    Pivoted,
    /// The working directory is the new root.
    CwdReset,
    /// The target command has taken over the process.
    CommandRunning,
}

impl SwitchStage {
    /// Returns the stage that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::MountsPrivate),
            Self::MountsPrivate => Some(Self::BindMounted),
            Self::BindMounted => Some(Self::OldRootCreated),
            Self::OldRootCreated => Some(Self::Pivoted),
            Self::Pivoted => Some(Self::CwdReset),
            Self::CwdReset => Some(Self::CommandRunning),
            Self::CommandRunning => None,
        }
    }
}

/// Displays the action that leads *into* the stage, for error messages.
impl fmt::Display for SwitchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "starting",
            Self::MountsPrivate => "making mounts private",
            Self::BindMounted => "bind-mounting rootfs",
            Self::OldRootCreated => "creating old root directory",
            Self::Pivoted => "pivoting root",
            Self::CwdReset => "changing directory to new root",
            Self::CommandRunning => "executing command",
        };
        write!(f, "{s}")
    }
}
