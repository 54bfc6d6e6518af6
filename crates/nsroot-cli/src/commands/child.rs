//! `nsroot child` — internal bootstrap phase, started only by `run`.

use std::ffi::OsString;

use clap::Args;
use nsroot_runtime::bootstrap;
use nsroot_runtime::invocation::{Invocation, Mode};

use super::IsolationArgs;

/// Arguments for the hidden `child` command.
#[derive(Args, Debug)]
pub struct ChildArgs {
    /// Isolation options forwarded by the launcher.
    #[command(flatten)]
    pub isolation: IsolationArgs,

    /// Command to exec once the root is switched.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

/// Executes the `child` command.
///
/// Never returns on success: the process becomes the target command.
///
/// # Errors
///
/// Returns an error if the target command cannot be executed. Root switch
/// failures abort the process instead.
pub fn execute(args: ChildArgs) -> anyhow::Result<()> {
    let invocation = Invocation::new(Mode::Child, args.isolation.into(), args.command)?;
    match bootstrap::run(&invocation)? {}
}
