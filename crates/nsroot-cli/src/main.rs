//! # nsroot
//!
//! Runs one command under fresh UTS, PID and mount namespaces with
//! `./rootfs` as its root filesystem.
//!
//! The same binary serves both phases: `nsroot run <cmd>` is the launcher,
//! and it re-executes itself as `nsroot child <cmd>` inside the new
//! namespaces.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");
    commands::execute(cli)
}
