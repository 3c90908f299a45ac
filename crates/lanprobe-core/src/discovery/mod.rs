//! UDP device discovery module.
//!
//! Broadcasts the discover command and collects replies for a bounded
//! window.

pub mod probe;

pub use probe::{DiscoveryProbe, ProbeOptions, DISCOVERY_PORT};
