//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Cache operations themselves never fail: an absent or expired key is a
//! sentinel (`None` / `false`), not an error. The only fallible surface is
//! configuration loading.

use thiserror::Error;

// == Config Error Enum ==
/// Errors produced while loading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable is set but does not parse as a duration
    #[error("invalid value {value:?} for {variable}: expected whole milliseconds")]
    InvalidDuration {
        /// Name of the offending environment variable
        variable: String,
        /// The raw value found in the environment
        value: String,
    },
}
