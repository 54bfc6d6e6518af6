//! System-wide constants and default names.

/// Directory, relative to the invocation cwd, that becomes the new root.
pub const DEFAULT_ROOTFS_DIR: &str = "rootfs";

/// Holding directory inside the new root that receives the previous root.
pub const OLD_ROOT_DIR: &str = "oldrootfs";

/// Permission bits of the old-root holding directory.
pub const OLD_ROOT_MODE: u32 = 0o700;

/// Kernel link to the image of the running process.
///
/// Re-executing through this path always runs the exact binary that is
/// currently executing, never a same-named file found via `PATH`.
pub const SELF_EXE: &str = "/proc/self/exe";

/// Mode selector for the externally invoked launcher phase.
pub const RUN_MODE: &str = "run";

/// Mode selector for the internal isolation bootstrap phase.
pub const CHILD_MODE: &str = "child";

/// Stack size handed to `clone(2)` for the launcher's child.
///
/// The callback only calls `execv`, so this is generous.
pub const CLONE_STACK_SIZE: usize = 1024 * 1024;

/// Exit status of a clone whose `execv` of the self image failed.
pub const EXEC_FAILED_STATUS: u8 = 127;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "nsroot";
