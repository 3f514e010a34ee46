//! Extractors for vtysh text output
//!
//! Both extractors are pure functions over the raw command output; neither
//! touches the cache or the process environment, which keeps the heuristics
//! testable in isolation. The cache write happens in the probe layer after a
//! successful parse.

pub mod config;
pub mod summary;

pub use config::{parse_running_config, ConfigValue, NeighborConfig};
pub use summary::parse_bgp_summary;
