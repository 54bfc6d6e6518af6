//! `nsroot run` — launch a command in an isolated process tree.

use std::ffi::OsString;

use clap::Args;
use nsroot_runtime::invocation::{Invocation, Mode};
use nsroot_runtime::launcher;

use super::IsolationArgs;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Isolation options.
    #[command(flatten)]
    pub isolation: IsolationArgs,

    /// Command to run inside the new root, with its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

/// Executes the `run` command.
///
/// Blocks until the isolated process tree exits.
///
/// # Errors
///
/// Returns an error if the namespaced process cannot be created or the
/// command does not exit successfully.
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let invocation = Invocation::new(Mode::Run, args.isolation.into(), args.command)?;
    launcher::run(&invocation)?;
    Ok(())
}
