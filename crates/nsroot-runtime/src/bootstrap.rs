//! Isolation bootstrap phase.
//!
//! Runs as PID 1 of the new PID namespace. Setup failures here are never
//! recovered: they go through [`must`], which ends the process before any
//! user code can run in a half-switched root. Only a failure to exec the
//! target command is returned as an ordinary error.

use std::convert::Infallible;
use std::path::Path;

use nsroot_common::error::Result;
use nsroot_common::types::SwitchStage;
use nsroot_core::exec::{exec_command, to_argv};
use nsroot_core::filesystem::RootSwitch;
use nsroot_core::filesystem::mount::mount_proc;
use nsroot_core::namespace::uts::set_hostname;

use crate::invocation::Invocation;

/// Unwraps the result of an unconditional setup step.
///
/// On error this logs the diagnostic and panics. With the release profile's
/// `panic = "abort"` the process dies on the spot; the launcher then sees
/// an abnormal exit and reports it.
///
/// # Panics
///
/// Panics whenever `result` is an error.
#[track_caller]
#[allow(clippy::panic)]
pub fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "fatal isolation setup failure");
            panic!("{e}");
        }
    }
}

/// Switches the root filesystem and replaces this process with the command.
///
/// Order: optional hostname, the full root switch, optional `/proc` mount,
/// then `execvp`. The command only starts after `chdir("/")` inside the new
/// root has succeeded.
///
/// # Panics
///
/// Panics (see [`must`]) if any setup step fails.
///
/// # Errors
///
/// Returns [`NsrootError::InvalidArgument`](nsroot_common::error::NsrootError::InvalidArgument)
/// before touching anything if the command cannot be passed to `execve`, or
/// [`NsrootError::Command`](nsroot_common::error::NsrootError::Command)
/// if the command cannot be executed.
pub fn run(invocation: &Invocation) -> Result<Infallible> {
    let config = invocation.config();
    let argv = to_argv(invocation.command())?;

    tracing::info!(
        mode = %invocation.mode(),
        pid = nix::unistd::getpid().as_raw(),
        rootfs = %config.rootfs.display(),
        "isolation bootstrap starting"
    );

    if let Some(hostname) = &config.hostname {
        must(set_hostname(hostname));
    }

    let mut switch = RootSwitch::new(config);
    must(switch.perform());

    if config.mount_proc {
        must(mount_proc(Path::new("/proc")));
    }

    tracing::info!(
        stage = ?SwitchStage::CommandRunning,
        command = %invocation.program().to_string_lossy(),
        "handing over to command"
    );
    exec_command(&argv)
}
