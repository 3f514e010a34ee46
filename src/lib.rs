//! bgpmon - Zabbix probe for FRRouting BGP neighbors
//!
//! This library queries a router's control-plane CLI (`vtysh`) for BGP
//! neighbor configuration and session state, and shapes the result for a
//! Zabbix monitoring pipeline: low-level discovery entries per neighbor and
//! a signed state code per session.
//!
//! # Core Concepts
//!
//! - **Extractors**: pure heuristic parsers over the column-aligned text
//!   vtysh prints ([`parser::parse_running_config`],
//!   [`parser::parse_bgp_summary`]) - the router's output is not a stable,
//!   delimited format, so everything fragile lives there
//! - **Cache**: one timestamped JSON record holding the most recent parse of
//!   either kind, valid for a short TTL ([`cache::CacheStore`])
//! - **Probe**: run-once orchestrator deciding cache-or-fetch per action
//!   ([`probe::Probe`])
//!
//! # Example Usage
//!
//! ```no_run
//! use bgpmon::cache::CacheStore;
//! use bgpmon::probe::Probe;
//! use bgpmon::source::VtyshSource;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = CacheStore::new("/tmp/bgpmon.json", Duration::from_secs(60));
//! let probe = Probe::new(
//!     VtyshSource::running_config("vtysh"),
//!     VtyshSource::bgp_summary("vtysh"),
//!     cache,
//! );
//!
//! for (ip, config) in probe.discovery()? {
//!     println!("{} -> {:?}", ip, config.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod parser;
pub mod probe;
pub mod source;
pub mod state;

// Re-export key types for convenient access
pub use cache::{CachePayload, CacheRecord, CacheStore};
pub use config::{BgpmonConfig, ConfigError};
pub use parser::{parse_bgp_summary, parse_running_config, ConfigValue, NeighborConfig};
pub use probe::{Probe, ProbeError};
pub use source::{SourceError, TextSource, VtyshSource};
pub use state::state_code;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_bgpmon() {
        assert_eq!(NAME, "bgpmon");
    }
}
