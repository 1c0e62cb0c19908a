//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (paths, timeouts, limits, retry shape)
//! - The library [`Config`] struct and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
