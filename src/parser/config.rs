//! Running-config extraction
//!
//! Scans `show running-config` output for per-neighbor settings. FRR prints
//! these as `neighbor <ip> <property> <value>` lines inside the `router bgp`
//! block; we only care about three properties and ignore everything else.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A nominally numeric config value.
///
/// `remote-as` and `maximum-prefix` usually carry a plain integer, but FRR
/// accepts trailing options ("maximum-prefix 1000 warning-only") and the
/// probe must retain whatever the config actually says rather than drop or
/// zero it. Untagged, so the cache file and discovery output carry a JSON
/// number or a JSON string exactly as the value parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Str(String),
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

/// Per-neighbor settings extracted from the running config.
///
/// Every field is independently optional: absence means the property is not
/// configured, not that it is zero. Serialized field names match the FRR
/// property names so the cache file keeps the upstream shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "remote-as", skip_serializing_if = "Option::is_none")]
    pub remote_as: Option<ConfigValue>,
    #[serde(rename = "maximum-prefix", skip_serializing_if = "Option::is_none")]
    pub max_prefix: Option<ConfigValue>,
}

/// Parses running-config text into a neighbor → settings map.
///
/// Multiple lines for the same neighbor merge into one record; the last
/// occurrence of a given property wins. Values are trimmed at the first `!`
/// (FRR comment marker). A `remote-as` or `maximum-prefix` value that does
/// not parse as an integer is retained as the raw string; the entry is never
/// dropped.
pub fn parse_running_config(text: &str) -> BTreeMap<String, NeighborConfig> {
    let line_re = Regex::new(
        r"neighbor\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\s+(description|remote-as|maximum-prefix)\s+(.*)",
    )
    .expect("valid regex");

    let mut settings: BTreeMap<String, NeighborConfig> = BTreeMap::new();

    for cap in line_re.captures_iter(text) {
        let ip = &cap[1];
        let property = &cap[2];
        let value = cap[3].split('!').next().unwrap_or("").trim();

        let entry = settings.entry(ip.to_string()).or_default();
        match property {
            "description" => entry.description = Some(value.to_string()),
            "remote-as" => entry.remote_as = Some(parse_value(ip, property, value)),
            "maximum-prefix" => entry.max_prefix = Some(parse_value(ip, property, value)),
            _ => unreachable!("property set is fixed by the regex"),
        }
    }

    settings
}

fn parse_value(ip: &str, property: &str, value: &str) -> ConfigValue {
    match value.parse::<i64>() {
        Ok(n) => ConfigValue::Int(n),
        Err(_) => {
            debug!(neighbor = ip, property, value, "non-numeric value, retaining as string");
            ConfigValue::Str(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNNING_CONFIG: &str = r#"
Building configuration...

Current configuration:
!
hostname edge1
!
router bgp 64512
 bgp router-id 192.0.2.1
 neighbor 192.0.2.10 remote-as 64513
 neighbor 192.0.2.10 description transit-upstream
 neighbor 192.0.2.10 maximum-prefix 1000
 neighbor 198.51.100.7 remote-as 64514
 neighbor 198.51.100.7 maximum-prefix 500 ! tightened 2024-03
!
line vty
!
end
"#;

    #[test]
    fn test_extracts_all_three_properties() {
        let settings = parse_running_config(RUNNING_CONFIG);
        let n = &settings["192.0.2.10"];
        assert_eq!(n.description.as_deref(), Some("transit-upstream"));
        assert_eq!(n.remote_as, Some(ConfigValue::Int(64513)));
        assert_eq!(n.max_prefix, Some(ConfigValue::Int(1000)));
    }

    #[test]
    fn test_trailing_comment_is_stripped() {
        let settings = parse_running_config(RUNNING_CONFIG);
        assert_eq!(settings["198.51.100.7"].max_prefix, Some(ConfigValue::Int(500)));
    }

    #[test]
    fn test_partial_configuration_leaves_fields_unset() {
        let settings = parse_running_config(RUNNING_CONFIG);
        let n = &settings["198.51.100.7"];
        assert!(n.description.is_none());
        assert_eq!(n.remote_as, Some(ConfigValue::Int(64514)));
    }

    #[test]
    fn test_last_occurrence_of_property_wins() {
        let text = "\
 neighbor 10.0.0.1 description old-name
 neighbor 10.0.0.1 description new-name
";
        let settings = parse_running_config(text);
        assert_eq!(settings["10.0.0.1"].description.as_deref(), Some("new-name"));
    }

    #[test]
    fn test_non_numeric_value_is_retained_as_string() {
        let text = " neighbor 10.0.0.2 maximum-prefix 1000 warning-only\n";
        let settings = parse_running_config(text);
        assert_eq!(
            settings["10.0.0.2"].max_prefix,
            Some(ConfigValue::Str("1000 warning-only".to_string()))
        );
    }

    #[test]
    fn test_config_value_serde_is_untagged() {
        assert_eq!(
            serde_json::to_string(&ConfigValue::Int(1000)).unwrap(),
            "1000"
        );
        assert_eq!(
            serde_json::to_string(&ConfigValue::Str("1000 warning-only".to_string())).unwrap(),
            r#""1000 warning-only""#
        );
        let back: ConfigValue = serde_json::from_str("64513").unwrap();
        assert_eq!(back, ConfigValue::Int(64513));
        let back: ConfigValue = serde_json::from_str(r#""lots""#).unwrap();
        assert_eq!(back, ConfigValue::Str("lots".to_string()));
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let first = parse_running_config(RUNNING_CONFIG);
        let second = parse_running_config(RUNNING_CONFIG);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(parse_running_config("").is_empty());
    }
}
