//! Launcher phase: create the isolated process and supervise it.

use nsroot_common::constants::SELF_EXE;
use nsroot_common::error::Result;
use nsroot_core::exec::{to_argv, to_cstring};
use nsroot_core::namespace;

use crate::invocation::Invocation;
use crate::status;

/// Re-executes this binary as the isolation bootstrap and waits for it.
///
/// The new process is created directly inside the configured namespaces
/// and shares this process's stdin, stdout and stderr. Nothing is retried.
///
/// # Errors
///
/// Returns [`NsrootError::Namespace`](nsroot_common::error::NsrootError::Namespace)
/// if the namespaced process cannot be created, or
/// [`NsrootError::Command`](nsroot_common::error::NsrootError::Command) if
/// it does not exit with status 0.
pub fn run(invocation: &Invocation) -> Result<()> {
    let config = invocation.config();
    let command = invocation.program().to_string_lossy().into_owned();

    match std::env::current_exe() {
        Ok(exe) => tracing::debug!(self_exe = SELF_EXE, resolved = %exe.display(), "re-executing self"),
        Err(e) => tracing::debug!(self_exe = SELF_EXE, error = %e, "re-executing self"),
    }

    let program = to_cstring(SELF_EXE)?;
    let argv = to_argv(invocation.child_args())?;

    tracing::info!(
        mode = %invocation.mode(),
        command = %command,
        namespaces = %config.namespaces,
        rootfs = %config.rootfs.display(),
        "launching isolated process"
    );

    let pid = namespace::spawn_isolated(&config.namespaces, &program, &argv)?;
    let exit = status::wait(pid, &command)?;
    status::check(&command, exit)?;

    tracing::info!(command = %command, "isolated process exited successfully");
    Ok(())
}
