//! BGP summary extraction
//!
//! Parses the session table printed by `show bgp summary`. The table is
//! column-aligned but not delimited, and the State/PfxRcd column is
//! variable-width: an Established session prints its received-prefix count
//! with no state word at all, while a down session prints a state label that
//! may itself span several whitespace-separated fields ("Idle (Admin)").
//! Everything format-fragile lives in [`parse_bgp_summary`] so that router
//! output drift stays isolated to this one function.

use std::collections::BTreeMap;
use tracing::trace;

/// Prefixes that mark the start of a state label in the summary table.
const STATE_KEYWORDS: [&str; 5] = ["Idle", "Connect", "Active", "Open", "Estab"];

/// Index of the first field after the fixed columns
/// (Neighbor, V, AS, MsgRcvd, MsgSent, TblVer, InQ, OutQ, Up/Down).
const STATE_FIELD: usize = 9;

/// Parses `show bgp summary` output into a neighbor → state-label map.
///
/// Per data line: field 0 is the neighbor address; scanning from the
/// State/PfxRcd column, a numeric field in the first position means the
/// session is Established (the prefix count is printed in place of a state
/// word), while a field starting with a state keyword begins a label that
/// runs until the next numeric field. Unrecognized labels are passed through
/// verbatim rather than rejected. Duplicate neighbor lines should not occur
/// upstream, but if they do the last one wins.
pub fn parse_bgp_summary(text: &str) -> BTreeMap<String, String> {
    let mut neighbors = BTreeMap::new();

    for line in text.lines() {
        // Header, banner and memory-usage lines all mention one of these.
        if line.trim().is_empty()
            || line.contains("Neighbor")
            || line.contains("IPv4")
            || line.contains("BGP")
        {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() <= STATE_FIELD {
            trace!(line, "skipping short line");
            continue;
        }

        let ip = parts[0];
        let state = extract_state(&parts);
        neighbors.insert(ip.to_string(), state);
    }

    neighbors
}

fn extract_state(parts: &[&str]) -> String {
    for (i, field) in parts.iter().enumerate().skip(STATE_FIELD) {
        if is_numeric(field) {
            // A count in the first post-Up/Down column means no state word
            // was printed, which the router only does for Established.
            if i == STATE_FIELD {
                return "Established".to_string();
            }
            break;
        }
        if STATE_KEYWORDS.iter().any(|kw| field.starts_with(kw)) {
            let label: Vec<&str> = parts[i..]
                .iter()
                .take_while(|f| !is_numeric(f))
                .copied()
                .collect();
            return label.join(" ");
        }
    }

    // Last-resort fallback: no keyword and no count found anywhere. Report
    // the raw State/PfxRcd field rather than inventing a value.
    parts
        .get(STATE_FIELD)
        .map(|f| f.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Numeric test for table fields, tolerating thousands separators
/// ("1,024" counts as numeric).
fn is_numeric(field: &str) -> bool {
    let stripped = field.replace(',', "");
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"
IPv4 Unicast Summary (VRF default):
BGP router identifier 192.0.2.1, local AS number 64512 vrf-id 0
BGP table version 42
RIB entries 11, using 2112 bytes of memory
Peers 4, using 2896 KiB of memory

Neighbor        V         AS   MsgRcvd   MsgSent   TblVer  InQ OutQ  Up/Down State/PfxRcd   PfxSnt Desc
192.0.2.10      4      64513     12345     12340        0    0    0 01:23:45            8       10 transit
198.51.100.7    4      64514       100       101        0    0    0 00:10:00 Idle (Admin)        0 peer
203.0.113.5     4      64515         0         0        0    0    0    never       Active        0 N/A
203.0.113.9     4      64516        52        49        0    0    0 00:02:11     OpenSent        0 N/A

Total number of neighbors 4
"#;

    #[test]
    fn test_numeric_column_means_established() {
        let states = parse_bgp_summary(SUMMARY);
        assert_eq!(states["192.0.2.10"], "Established");
    }

    #[test]
    fn test_multi_word_label_is_joined() {
        let states = parse_bgp_summary(SUMMARY);
        assert_eq!(states["198.51.100.7"], "Idle (Admin)");
    }

    #[test]
    fn test_single_word_labels() {
        let states = parse_bgp_summary(SUMMARY);
        assert_eq!(states["203.0.113.5"], "Active");
        assert_eq!(states["203.0.113.9"], "OpenSent");
    }

    #[test]
    fn test_header_and_banner_lines_are_not_data() {
        let states = parse_bgp_summary(SUMMARY);
        assert_eq!(states.len(), 4);
        assert!(!states.contains_key("Total"));
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let states = parse_bgp_summary("192.0.2.1 4 64512 0 0\n");
        assert!(states.is_empty());
    }

    #[test]
    fn test_prefix_count_with_thousands_separator() {
        let line = "192.0.2.10 4 64513 12345 12340 0 0 0 01:23:45 1,024 10\n";
        let states = parse_bgp_summary(line);
        assert_eq!(states["192.0.2.10"], "Established");
    }

    #[test]
    fn test_duplicate_neighbor_last_line_wins() {
        let text = "\
192.0.2.10 4 64513 1 1 0 0 0 00:01:00 Active 0
192.0.2.10 4 64513 2 2 0 0 0 00:02:00 8 10
";
        let states = parse_bgp_summary(text);
        assert_eq!(states["192.0.2.10"], "Established");
    }

    // Best-effort behavior when neither a keyword nor a count ever appears:
    // pass the raw State/PfxRcd field through so the operator sees what the
    // router actually printed.
    #[test]
    fn test_fallback_uses_raw_field_when_no_keyword_matches() {
        let line = "192.0.2.10 4 64513 12345 12340 0 0 0 01:23:45 Clearing stale\n";
        let states = parse_bgp_summary(line);
        assert_eq!(states["192.0.2.10"], "Clearing");
    }

    #[test]
    fn test_unrecognized_idle_variant_passes_through() {
        let line = "192.0.2.10 4 64513 1 1 0 0 0 00:01:00 Idle (Hold) 0\n";
        let states = parse_bgp_summary(line);
        assert_eq!(states["192.0.2.10"], "Idle (Hold)");
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(parse_bgp_summary("").is_empty());
    }
}
