//! Argument conversion and process image replacement.

use std::convert::Infallible;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;

use nsroot_common::error::{NsrootError, Result};

/// Converts one argument into a C string for `execve(2)`.
///
/// # Errors
///
/// Returns [`NsrootError::InvalidArgument`] if `arg` contains a NUL byte.
pub fn to_cstring(arg: impl AsRef<OsStr>) -> Result<CString> {
    let arg = arg.as_ref();
    CString::new(arg.as_bytes()).map_err(|_| NsrootError::InvalidArgument {
        argument: arg.to_string_lossy().into_owned(),
    })
}

/// Converts a whole argument vector, preserving order.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn to_argv<I>(args: I) -> Result<Vec<CString>>
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    args.into_iter().map(to_cstring).collect()
}

/// Replaces the current process image with `argv[0]`, looked up in `PATH`.
///
/// Only returns on failure.
///
/// # Errors
///
/// Returns [`NsrootError::Command`] if `argv` is empty or `execvp(2)`
/// fails.
pub fn exec_command(argv: &[CString]) -> Result<Infallible> {
    let Some(program) = argv.first() else {
        return Err(NsrootError::Command {
            command: String::new(),
            message: "no command given".into(),
        });
    };

    tracing::debug!(command = ?program, argc = argv.len(), "exec");
    nix::unistd::execvp(program, argv).map_err(|e| NsrootError::Command {
        command: program.to_string_lossy().into_owned(),
        message: e.desc().to_string(),
    })
}
