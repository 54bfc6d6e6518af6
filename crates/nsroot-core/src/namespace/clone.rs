//! Namespaced process creation via `clone(2)`.

use std::ffi::{CStr, CString};

use nix::sched::CloneFlags;
use nix::unistd::{Pid, execv};
use nsroot_common::constants::{CLONE_STACK_SIZE, EXEC_FAILED_STATUS};
use nsroot_common::error::{NsrootError, Result};
use nsroot_common::types::NamespaceSet;

/// Creates a child inside fresh namespaces and execs `program` in it.
///
/// The namespace flags are passed to `clone(2)` itself, so there is no
/// window where the child runs with the parent's namespaces. The child
/// inherits stdin, stdout and stderr. If `execv` fails inside the child it
/// exits with status 127.
///
/// # Errors
///
/// Returns [`NsrootError::Namespace`] if `set` requests no namespace at
/// all, or if `clone(2)` fails, typically with `EPERM` when the caller
/// lacks `CAP_SYS_ADMIN`.
#[allow(unsafe_code)]
pub fn spawn_isolated(set: &NamespaceSet, program: &CStr, argv: &[CString]) -> Result<Pid> {
    if set.is_empty() {
        return Err(NsrootError::Namespace {
            message: "refusing to launch without any namespace".into(),
        });
    }

    let flags: CloneFlags = super::clone_flags(set);
    let mut stack = vec![0_u8; CLONE_STACK_SIZE];

    let child = Box::new(|| -> isize {
        match execv(program, argv) {
            Ok(never) => match never {},
            Err(_) => isize::from(EXEC_FAILED_STATUS),
        }
    });

    // SAFETY: the child gets a copy of the address space (no CLONE_VM), is
    // spawned from a single-threaded launcher, and immediately execs.
    let pid = unsafe { nix::sched::clone(child, &mut stack, flags, Some(libc::SIGCHLD)) }
        .map_err(|e| NsrootError::Namespace {
            message: format!("clone({set}) failed: {e}"),
        })?;

    tracing::debug!(pid = pid.as_raw(), namespaces = %set, "isolated process created");
    Ok(pid)
}
