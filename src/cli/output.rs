//! Zabbix output shaping
//!
//! The monitoring side of the contract: discovery entries use Zabbix
//! low-level-discovery macro names as JSON keys, the state answer is a single
//! integer, and any fatal condition is the literal `ZBX_NOTSUPPORTED` token
//! with a reason suffix. Nothing else may reach stdout.

use crate::parser::{ConfigValue, NeighborConfig};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Token Zabbix recognizes as "this item cannot be collected".
pub const ZBX_NOTSUPPORTED: &str = "ZBX_NOTSUPPORTED";

/// Discovery default when no description is configured.
const NO_DESCRIPTION: &str = "N/A";

/// Discovery default when no maximum-prefix limit is configured.
const NO_MAX_PREFIX: i64 = -1;

#[derive(Debug, Serialize)]
struct DiscoveryEntry {
    #[serde(rename = "{#PEER_IP}")]
    peer_ip: String,
    #[serde(rename = "{#DESCRIPTION}")]
    description: String,
    // Numeric when the config value parsed as an integer, otherwise the raw
    // configured string.
    #[serde(rename = "{#MAX-PREFIX}")]
    max_prefix: ConfigValue,
}

#[derive(Debug, Serialize)]
struct DiscoveryReport {
    data: Vec<DiscoveryEntry>,
}

#[derive(Debug, Serialize)]
struct StateReport {
    state: i64,
}

/// Renders the discovery payload, one entry per configured neighbor.
pub fn format_discovery(settings: &BTreeMap<String, NeighborConfig>) -> Result<String> {
    let report = DiscoveryReport {
        data: settings
            .iter()
            .map(|(ip, config)| DiscoveryEntry {
                peer_ip: ip.clone(),
                description: config
                    .description
                    .clone()
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                max_prefix: config
                    .max_prefix
                    .clone()
                    .unwrap_or(ConfigValue::Int(NO_MAX_PREFIX)),
            })
            .collect(),
    };
    Ok(serde_json::to_string(&report)?)
}

/// Renders the single-neighbor state payload.
pub fn format_state(code: i64) -> Result<String> {
    Ok(serde_json::to_string(&StateReport { state: code })?)
}

/// Renders the failure token, with a reason when one is known.
pub fn format_notsupported(reason: &str) -> String {
    if reason.is_empty() {
        ZBX_NOTSUPPORTED.to_string()
    } else {
        format!("{}: {}", ZBX_NOTSUPPORTED, reason)
    }
}
