//! Shared core library for lanprobe device discovery.
//!
//! Implements the UDP port-8888 discovery exchange: a broadcast probe
//! that collects replies for a bounded window, and a unicast datagram
//! send for talking to a single device.

pub mod device;
pub mod discovery;
pub mod error;
pub mod protocol;
