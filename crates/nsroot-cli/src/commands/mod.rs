//! CLI command definitions and dispatch.

pub mod child;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nsroot_common::config::IsolationConfig;
use nsroot_common::constants::{BIN_NAME, DEFAULT_ROOTFS_DIR};

/// nsroot — run a command in fresh namespaces with a pivoted root.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Phase to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// The two phases, selected by the first argument.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command inside new UTS, PID and mount namespaces.
    Run(run::RunArgs),
    /// Internal: set up the new root and exec the command.
    #[command(hide = true)]
    Child(child::ChildArgs),
}

/// Isolation options accepted by both phases.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IsolationArgs {
    /// Directory that becomes `/`, relative to the current directory.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROOTFS_DIR)]
    pub rootfs: PathBuf,

    /// Hostname to set inside the new UTS namespace.
    #[arg(long)]
    pub hostname: Option<String>,

    /// Mount a fresh /proc inside the new root before running the command.
    #[arg(long)]
    pub mount_proc: bool,
}

impl From<IsolationArgs> for IsolationConfig {
    fn from(args: IsolationArgs) -> Self {
        Self {
            rootfs: args.rootfs,
            hostname: args.hostname,
            mount_proc: args.mount_proc,
            ..Self::default()
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the selected phase fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => run::execute(args),
        Command::Child(args) => child::execute(args),
    }
}
