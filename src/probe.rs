//! Probe orchestration
//!
//! Decides per action whether the cache already holds a fresh payload of the
//! right kind, and otherwise runs the extractor pipeline: fetch raw text,
//! parse, refresh the cache, shape the answer. One invocation performs at
//! most one source call.

use crate::cache::{CachePayload, CacheStore};
use crate::parser::{parse_bgp_summary, parse_running_config, NeighborConfig};
use crate::source::{SourceError, TextSource};
use crate::state::state_code;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The upstream CLI could not be invoked or exited non-zero. Fatal; the
    /// caller reports `ZBX_NOTSUPPORTED` and exits non-zero.
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Run-once probe over a config source, a summary source and the cache.
pub struct Probe<C, S> {
    config_source: C,
    summary_source: S,
    cache: CacheStore,
    use_cache: bool,
}

impl<C: TextSource, S: TextSource> Probe<C, S> {
    pub fn new(config_source: C, summary_source: S, cache: CacheStore) -> Self {
        Self {
            config_source,
            summary_source,
            cache,
            use_cache: true,
        }
    }

    /// Skips cache reads for this run. The cache is still refreshed after a
    /// live parse so the next invocation benefits.
    pub fn without_cache_reads(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Returns the neighbor → settings map for discovery, from cache if a
    /// fresh config payload is stored, otherwise from the config source.
    pub fn discovery(&self) -> Result<BTreeMap<String, NeighborConfig>, ProbeError> {
        if self.use_cache {
            if let Some(CachePayload::Config(map)) = self.cache.read().map(|r| r.payload) {
                debug!(neighbors = map.len(), "discovery served from cache");
                return Ok(map);
            }
        }

        let text = self.config_source.fetch()?;
        let map = parse_running_config(&text);
        info!(neighbors = map.len(), "parsed running config");
        self.refresh_cache(CachePayload::Config(map.clone()));
        Ok(map)
    }

    /// Returns the encoded session state for one neighbor. A neighbor absent
    /// from the summary is valid information, not an error: it encodes as 0.
    pub fn neighbor_state(&self, neighbor: &str) -> Result<i64, ProbeError> {
        let states = self.session_states()?;
        let label = states.get(neighbor).map(String::as_str).unwrap_or("");
        if label.is_empty() {
            debug!(neighbor, "neighbor not present in summary");
        }
        Ok(state_code(label))
    }

    fn session_states(&self) -> Result<BTreeMap<String, String>, ProbeError> {
        if self.use_cache {
            if let Some(CachePayload::Summary(map)) = self.cache.read().map(|r| r.payload) {
                debug!(neighbors = map.len(), "summary served from cache");
                return Ok(map);
            }
        }

        let text = self.summary_source.fetch()?;
        let map = parse_bgp_summary(&text);
        info!(neighbors = map.len(), "parsed bgp summary");
        self.refresh_cache(CachePayload::Summary(map.clone()));
        Ok(map)
    }

    // The cache is advisory: losing a write costs one extra vtysh call on
    // the next probe, so it must never fail the run.
    fn refresh_cache(&self, payload: CachePayload) {
        if let Err(err) = self.cache.write(payload) {
            warn!(%err, "cache write failed, continuing without cache");
        }
    }
}
