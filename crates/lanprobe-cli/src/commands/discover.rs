//! Discover command implementation.

use colored::*;

use lanprobe_core::discovery::{DiscoveryProbe, ProbeOptions};

use crate::error::CliError;

/// Run the discovery probe with default options and print each reply.
pub async fn run_discover() -> Result<(), CliError> {
    let options = ProbeOptions::default();
    let probe = DiscoveryProbe::new(options.clone())?;

    println!("Sending discovery broadcast to port {}...", options.port);
    probe.broadcast().await?;

    println!(
        "Listening for responses for {} seconds...",
        options.response_window.as_secs()
    );

    let count = probe
        .collect(|reply| {
            println!(
                "Received from {}: {}",
                reply.addr.to_string().bold(),
                reply.text
            );
        })
        .await?;

    println!("Discovery finished. {} response(s).", count);

    Ok(())
}
