//! Waiting on the isolated process and interpreting how it ended.

use nix::errno::Errno;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::Pid;
use nsroot_common::error::{NsrootError, Result};

/// Blocks until `pid` exits or is killed.
///
/// `EINTR` restarts the wait.
///
/// # Errors
///
/// Returns [`NsrootError::Command`] if `waitpid(2)` fails.
pub fn wait(pid: Pid, command: &str) -> Result<WaitStatus> {
    loop {
        match waitpid(pid, None) {
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => {
                tracing::debug!(pid = pid.as_raw(), ?status, "isolated process finished");
                return Ok(status);
            }
            Ok(status) => tracing::debug!(pid = pid.as_raw(), ?status, "ignoring wait status"),
            Err(Errno::EINTR) => {}
            Err(e) => {
                return Err(NsrootError::Command {
                    command: command.to_string(),
                    message: format!("waitpid({pid}) failed: {e}"),
                });
            }
        }
    }
}

/// Maps a final wait status to success or a [`NsrootError::Command`].
///
/// # Errors
///
/// Returns an error for a non-zero exit, a fatal signal, or any status
/// that is not a termination.
pub fn check(command: &str, status: WaitStatus) -> Result<()> {
    let message = match status {
        WaitStatus::Exited(_, 0) => return Ok(()),
        WaitStatus::Exited(_, code) => format!("exit status {code}"),
        WaitStatus::Signaled(_, signal, core_dumped) => {
            if core_dumped {
                format!("signal: {signal} (core dumped)")
            } else {
                format!("signal: {signal}")
            }
        }
        other => format!("unexpected wait status {other:?}"),
    };

    Err(NsrootError::Command {
        command: command.to_string(),
        message,
    })
}
