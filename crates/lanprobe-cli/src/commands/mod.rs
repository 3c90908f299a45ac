//! Command implementations.

pub mod discover;
pub mod send;

pub use discover::run_discover;
pub use send::run_send;
