//! Root filesystem switching via `pivot_root(2)`.
//!
//! The switch is a strict sequence: private propagation, self bind mount,
//! old-root holding directory, pivot, and `chdir("/")`. Each step must
//! succeed before the next is attempted, and the sequence never goes
//! backwards. The old root stays mounted under the holding directory.

use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use nsroot_common::config::IsolationConfig;
use nsroot_common::error::{NsrootError, Result};
use nsroot_common::types::SwitchStage;

/// The operations a root switch is made of.
///
/// [`Syscalls`] is the real implementation; the seam exists so the
/// ordering can be exercised without `CAP_SYS_ADMIN`.
pub trait RootOps {
    /// Makes every mount under `/` private.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error.
    fn make_mounts_private(&mut self) -> io::Result<()>;

    /// Bind-mounts `dir` onto itself.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error.
    fn bind_mount_self(&mut self, dir: &Path) -> io::Result<()>;

    /// Creates `dir` (and missing parents) with permission bits `mode`.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error.
    fn create_dir(&mut self, dir: &Path, mode: u32) -> io::Result<()>;

    /// Makes `new_root` the root and moves the old root to `put_old`.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error.
    fn pivot_root(&mut self, new_root: &Path, put_old: &Path) -> io::Result<()>;

    /// Changes the working directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error.
    fn chdir(&mut self, dir: &Path) -> io::Result<()>;
}

/// [`RootOps`] backed by the real system calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Syscalls;

impl RootOps for Syscalls {
    fn make_mounts_private(&mut self) -> io::Result<()> {
        super::mount::make_mounts_private()
    }

    fn bind_mount_self(&mut self, dir: &Path) -> io::Result<()> {
        super::mount::bind_mount_self(dir)
    }

    fn create_dir(&mut self, dir: &Path, mode: u32) -> io::Result<()> {
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(dir)
    }

    fn pivot_root(&mut self, new_root: &Path, put_old: &Path) -> io::Result<()> {
        nix::unistd::pivot_root(new_root, put_old)?;
        Ok(())
    }

    fn chdir(&mut self, dir: &Path) -> io::Result<()> {
        nix::unistd::chdir(dir)?;
        Ok(())
    }
}

/// An in-progress switch of the process's root to `rootfs`.
#[derive(Debug)]
pub struct RootSwitch<O> {
    ops: O,
    rootfs: PathBuf,
    put_old: PathBuf,
    old_root_mode: u32,
    stage: SwitchStage,
}

impl RootSwitch<Syscalls> {
    /// Prepares a switch to `config.rootfs` using the real system calls.
    ///
    /// The previous root ends up at [`IsolationConfig::old_root_path`]
    /// before the pivot, i.e. `/<old_root>` afterwards.
    #[must_use]
    pub fn new(config: &IsolationConfig) -> Self {
        Self::with_ops(Syscalls, config)
    }
}

impl<O: RootOps> RootSwitch<O> {
    /// Prepares a switch that performs each step through `ops`.
    pub fn with_ops(ops: O, config: &IsolationConfig) -> Self {
        Self {
            ops,
            rootfs: config.rootfs.clone(),
            put_old: config.old_root_path(),
            old_root_mode: nsroot_common::constants::OLD_ROOT_MODE,
            stage: SwitchStage::Start,
        }
    }

    /// The last stage that completed.
    pub const fn stage(&self) -> SwitchStage {
        self.stage
    }

    /// Consumes the switch and returns its operations backend.
    pub fn into_ops(self) -> O {
        self.ops
    }

    /// Performs every remaining step in order.
    ///
    /// On success the stage is [`SwitchStage::CwdReset`]. On failure the
    /// stage stays at the last completed step and nothing further is
    /// attempted.
    ///
    /// # Errors
    ///
    /// Returns [`NsrootError::RootSwitch`] naming the step that failed.
    pub fn perform(&mut self) -> Result<()> {
        tracing::info!(rootfs = %self.rootfs.display(), "switching root filesystem");

        while self.stage < SwitchStage::CwdReset {
            self.step()?;
        }

        tracing::info!(stage = ?self.stage, "root filesystem switched");
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let Some(next) = self.stage.next() else {
            return Ok(());
        };

        let outcome = match next {
            SwitchStage::MountsPrivate => self.ops.make_mounts_private(),
            SwitchStage::BindMounted => self.ops.bind_mount_self(&self.rootfs),
            SwitchStage::OldRootCreated => self.ops.create_dir(&self.put_old, self.old_root_mode),
            SwitchStage::Pivoted => self.ops.pivot_root(&self.rootfs, &self.put_old),
            SwitchStage::CwdReset => self.ops.chdir(Path::new("/")),
            SwitchStage::Start | SwitchStage::CommandRunning => Ok(()),
        };

        outcome.map_err(|source| NsrootError::RootSwitch {
            stage: next,
            source,
        })?;

        tracing::debug!(stage = ?next, "root switch step complete");
        self.stage = next;
        Ok(())
    }
}
