// Wi-Fi Roaming - Network Records
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network record type shared by the parser, the controller and the engine.
//!
//! A record describes either a configured network (it carries the
//! controller-assigned `number` and a `priority`) or a network seen in scan
//! results (SSID only). Two records refer to the same network when their
//! SSIDs are equal.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A value assigned inside a supplicant `network={}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Integer literal (`priority=10`).
    Integer(i64),
    /// Quoted or bare string (`ssid="Home"`, `key_mgmt=WPA-PSK`).
    Text(String),
}

impl PropertyValue {
    /// Get the integer value, if this is an integer literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A configured or observed wireless network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkRecord {
    /// Network name, the join key between configured and available networks.
    pub ssid: String,
    /// Controller-assigned identifier. `None` for scan-only records.
    pub number: Option<u32>,
    /// Operator preference; higher wins.
    pub priority: i64,
    /// Pass-through configuration properties not interpreted by the engine.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl NetworkRecord {
    /// Create a record for a network seen in scan results.
    pub fn available(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }

    /// Create a record for a configured network.
    pub fn configured(number: u32, ssid: impl Into<String>, priority: i64) -> Self {
        Self {
            ssid: ssid.into(),
            number: Some(number),
            priority,
            properties: BTreeMap::new(),
        }
    }

    /// Look up a pass-through property.
    #[allow(dead_code)]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

impl fmt::Display for NetworkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' with priority {}", self.ssid, self.priority)
    }
}

/// Sort networks by priority, highest first.
///
/// The sort is stable: networks with equal priority keep their listing order.
pub fn sort_by_priority(networks: &mut [NetworkRecord]) {
    networks.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Configured networks whose SSID also appears among the available ones.
///
/// Preserves the order of `configured`.
pub fn interested_networks(
    configured: &[NetworkRecord],
    available: &[NetworkRecord],
) -> Vec<NetworkRecord> {
    let in_range: HashSet<&str> = available
        .iter()
        .map(|a| a.ssid.as_str())
        .filter(|ssid| !ssid.is_empty())
        .collect();

    configured
        .iter()
        .filter(|c| in_range.contains(c.ssid.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssids(networks: &[NetworkRecord]) -> Vec<&str> {
        networks.iter().map(|n| n.ssid.as_str()).collect()
    }

    #[test]
    fn test_sort_by_priority_descending() {
        let mut networks = vec![
            NetworkRecord::configured(0, "A", 5),
            NetworkRecord::configured(1, "B", 20),
            NetworkRecord::configured(2, "C", 1),
        ];
        sort_by_priority(&mut networks);
        assert_eq!(ssids(&networks), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_by_priority_ties_keep_order() {
        let mut networks = vec![
            NetworkRecord::configured(0, "first", 3),
            NetworkRecord::configured(1, "top", 9),
            NetworkRecord::configured(2, "second", 3),
            NetworkRecord::configured(3, "third", 3),
        ];
        sort_by_priority(&mut networks);
        assert_eq!(ssids(&networks), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_interested_networks_preserves_configured_order() {
        let configured = vec![
            NetworkRecord::configured(1, "Office", 20),
            NetworkRecord::configured(0, "Home", 10),
            NetworkRecord::configured(2, "Cafe", 1),
        ];
        let available = vec![
            NetworkRecord::available("Cafe"),
            NetworkRecord::available("Neighbour"),
            NetworkRecord::available("Office"),
        ];

        let interested = interested_networks(&configured, &available);
        assert_eq!(ssids(&interested), vec!["Office", "Cafe"]);
        assert_eq!(interested[0].number, Some(1));
    }

    #[test]
    fn test_interested_networks_is_case_sensitive() {
        let configured = vec![NetworkRecord::configured(0, "Home", 1)];
        let available = vec![NetworkRecord::available("home")];
        assert!(interested_networks(&configured, &available).is_empty());
    }

    #[test]
    fn test_empty_ssid_never_matches() {
        let configured = vec![NetworkRecord::configured(0, "", 1)];
        let available = vec![NetworkRecord::available("")];
        assert!(interested_networks(&configured, &available).is_empty());
    }

    #[test]
    fn test_display() {
        let network = NetworkRecord::configured(4, "Home", 10);
        assert_eq!(network.to_string(), "'Home' with priority 10");
        assert_eq!(PropertyValue::Integer(-2).to_string(), "-2");
        assert_eq!(PropertyValue::Text("WPA-PSK".into()).to_string(), "WPA-PSK");
    }
}
