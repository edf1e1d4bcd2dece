//! Shared utilities for Murmur.
//!
//! Logging setup and timestamp helpers used by the server binary and its tests.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
