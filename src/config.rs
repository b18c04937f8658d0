//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// TTL applied when none is configured: 5 minutes.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Sweep cadence applied when none is configured: 5 minutes.
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to entries stored without an explicit TTL
    pub default_ttl: Duration,
    /// Interval between background cleanup sweeps
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMOCACHE_DEFAULT_TTL_MS` - entry TTL in milliseconds (default: 300000)
    /// - `MEMOCACHE_CLEANUP_INTERVAL_MS` - sweep interval in milliseconds (default: 300000)
    ///
    /// A missing variable falls back to its default; a variable that is set
    /// but does not parse as whole milliseconds is an error, so a typo
    /// cannot silently run the cache with the wrong lifetime.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_ttl: read_duration_ms("MEMOCACHE_DEFAULT_TTL_MS", DEFAULT_TTL)?,
            cleanup_interval: read_duration_ms(
                "MEMOCACHE_CLEANUP_INTERVAL_MS",
                DEFAULT_CLEANUP_INTERVAL,
            )?,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

/// Reads a millisecond duration from the environment, falling back to
/// `default` when the variable is unset.
fn read_duration_ms(name: &str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Ok(Duration::from_millis(ms)),
            Err(_) => Err(ConfigError::InvalidDuration {
                variable: name.to_string(),
                value: raw,
            }),
        },
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidDuration {
            variable: name.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}
