//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

/// lanprobe - UDP device discovery for the local network
#[derive(Parser, Debug)]
#[command(name = "lanprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// With no subcommand, runs the discovery probe with default settings
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a raw UTF-8 datagram to a single device
    Send(SendArgs),
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Device IP address
    pub ip: String,

    /// Datagram text to send
    pub data: String,
}
