//! lanprobe - probe the local network for devices on the UDP discovery port.
//!
//! Running with no arguments broadcasts the discover command and prints
//! every reply received within the response window.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::*;

use cli::{Cli, Commands};
use error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Failures are reported on stderr; the process still exits 0.
    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red(), e);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        None => commands::run_discover().await,
        Some(Commands::Send(args)) => commands::run_send(args).await,
    }
}
