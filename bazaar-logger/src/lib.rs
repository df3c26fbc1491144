//! Logging initialization for hosts embedding the SDK.
//!
//! The SDK crates emit `tracing` events; this crate wires up a subscriber
//! from a deserializable [`LogConfig`] so services can configure level,
//! format, and destination from their config files.

pub mod logging;

pub use logging::{init, LogConfig, LogFormat, LogOutput};
