//! Send command implementation.

use std::net::IpAddr;

use lanprobe_core::device::send_datagram;
use lanprobe_core::discovery::DISCOVERY_PORT;

use crate::cli::SendArgs;
use crate::error::CliError;

/// Send one datagram to a device on the discovery port.
pub async fn run_send(args: SendArgs) -> Result<(), CliError> {
    let ip: IpAddr = args
        .ip
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("invalid IP address: {}", args.ip)))?;

    send_datagram(ip, DISCOVERY_PORT, &args.data).await?;

    println!("Sent {} byte(s) to {}:{}", args.data.len(), ip, DISCOVERY_PORT);

    Ok(())
}
