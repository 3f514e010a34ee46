//! Time-bounded cache for parsed vtysh output
//!
//! One JSON file holds the most recent extractor result, whichever extractor
//! ran last. The two payload shapes share the single slot, so the record is a
//! tagged union: a stale config payload can never be mistaken for a summary
//! payload or vice versa. There is no eviction; staleness is decided by age
//! at read time.
//!
//! The cache is advisory. Two concurrent probes may race on the file; each
//! write goes through its own uniquely named temp file and a rename, so the
//! last full write wins and a reader never observes a partial record.

use crate::parser::NeighborConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Default location of the cache file, shared with the legacy probe.
pub const DEFAULT_CACHE_FILE: &str = "/tmp/bgpmon.json";

/// Default maximum age, in seconds, before a cached payload is re-fetched.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Errors raised by the cache write path.
///
/// Read-side errors are deliberately not represented: every failure to read
/// or decode the file is a cache miss, never an error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to write cache file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode cache record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The payload kinds that can occupy the cache slot.
///
/// Externally tagged so the file keeps the legacy shape: the config map
/// serializes under `neighbor_settings`, the summary map under `neighbors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CachePayload {
    #[serde(rename = "neighbor_settings")]
    Config(BTreeMap<String, NeighborConfig>),
    #[serde(rename = "neighbors")]
    Summary(BTreeMap<String, String>),
}

/// A timestamped cache record. Exactly one payload kind at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(flatten)]
    pub payload: CachePayload,
    /// Capture time as epoch seconds.
    pub timestamp: f64,
}

/// Single-record store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored record if it exists, decodes, and is still fresh.
    ///
    /// Any IO or decode failure is absorbed as a miss so the caller falls
    /// back to live extraction.
    pub fn read(&self) -> Option<CacheRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "cache miss: unreadable");
                return None;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "cache miss: undecodable");
                return None;
            }
        };

        let age = epoch_now() - record.timestamp;
        if age > self.ttl.as_secs_f64() {
            debug!(age, "cache miss: stale");
            return None;
        }

        Some(record)
    }

    /// Replaces the stored record with a freshly timestamped one.
    ///
    /// The record is fully written to a uniquely named temp file in the same
    /// directory before being renamed into place. Concurrent writers each
    /// publish their own complete file, so the path only ever holds a full
    /// record and the last rename wins.
    pub fn write(&self, payload: CachePayload) -> Result<(), CacheError> {
        let record = CacheRecord {
            payload,
            timestamp: epoch_now(),
        };
        let encoded = serde_json::to_string(&record)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
