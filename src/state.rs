//! Session state encoding for Zabbix items
//!
//! Maps the BGP FSM state labels printed by `show bgp summary` onto the fixed
//! signed codes the Zabbix template expects. Recognized states are negative
//! and distinct; anything the router prints that we do not recognize encodes
//! as 0 ("unknown/no data").

/// Encodes a session state label as its Zabbix item value.
///
/// The table is static: it never changes at runtime, and unknown labels
/// (including the empty string used for a neighbor with no data) map to 0.
pub fn state_code(label: &str) -> i64 {
    match label {
        "Idle (Admin)" => -1,
        "Idle (PfxCt)" => -2,
        "Idle" => -3,
        "Connect" => -4,
        "Active" => -5,
        "OpenSent" => -6,
        "OpenConfirm" => -7,
        "Established" => -8,
        _ => 0,
    }
}
