//! Configuration for bgpmon
//!
//! All settings come from environment variables with working defaults, so a
//! bare Zabbix item key invocation needs no setup:
//!
//! - `BGPMON_VTYSH_PATH`: vtysh binary to invoke - default: "vtysh"
//! - `BGPMON_CACHE_FILE`: cache file path - default: "/tmp/bgpmon.json"
//! - `BGPMON_CACHE_TTL`: cache lifetime in seconds - default: "60"
//! - `BGPMON_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cache::{DEFAULT_CACHE_FILE, DEFAULT_CACHE_TTL_SECS};

const DEFAULT_VTYSH_PATH: &str = "vtysh";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BGPMON_CACHE_TTL value {0:?}: expected whole seconds")]
    InvalidTtl(String),

    #[error("BGPMON_VTYSH_PATH must not be empty")]
    EmptyVtyshPath,

    #[error("BGPMON_CACHE_FILE must not be empty")]
    EmptyCacheFile,
}

/// Runtime configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct BgpmonConfig {
    /// Path or name of the vtysh binary.
    pub vtysh_path: String,
    /// Location of the single-record cache file.
    pub cache_file: PathBuf,
    /// Maximum age before a cached payload is re-fetched.
    pub cache_ttl: Duration,
    /// Default log level when no flag or RUST_LOG overrides it.
    pub log_level: String,
}

impl BgpmonConfig {
    /// Loads configuration from environment variables, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_raw =
            env::var("BGPMON_CACHE_TTL").unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string());
        let ttl_secs: u64 = ttl_raw
            .parse()
            .map_err(|_| ConfigError::InvalidTtl(ttl_raw))?;

        let config = Self {
            vtysh_path: env::var("BGPMON_VTYSH_PATH")
                .unwrap_or_else(|_| DEFAULT_VTYSH_PATH.to_string()),
            cache_file: env::var("BGPMON_CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_FILE)),
            cache_ttl: Duration::from_secs(ttl_secs),
            log_level: env::var("BGPMON_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the environment cannot guarantee.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vtysh_path.trim().is_empty() {
            return Err(ConfigError::EmptyVtyshPath);
        }
        if self.cache_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCacheFile);
        }
        Ok(())
    }
}

impl Default for BgpmonConfig {
    fn default() -> Self {
        Self {
            vtysh_path: DEFAULT_VTYSH_PATH.to_string(),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
