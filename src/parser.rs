// Wi-Fi Roaming - Supplicant Configuration Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parser for `wpa_supplicant.conf`-style configuration text.
//!
//! The text is a sequence of top-level `key=value` lines and
//! `network={ ... }` blocks. Lines starting with `#` are comments. Only the
//! network blocks are turned into records; each is numbered by its position
//! among the blocks, which matches how the supplicant numbers networks it
//! loaded from the file.
//!
//! ```text
//! ctrl_interface=/run/wpa_supplicant
//! network={
//!     ssid="Home"
//!     priority=10
//! }
//! ```
//!
//! Any structural problem fails the whole parse; partial results are never
//! returned.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::models::{Error, NetworkRecord, PropertyValue, Result};

static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+)\s*=\s*(.*)$").expect("assignment pattern is valid"));

static NETWORK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^network\s*=\s*\{$").expect("network pattern is valid"));

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern is valid"));

/// A network block being collected.
struct Block {
    opened_at: usize,
    ssid: String,
    priority: i64,
    properties: BTreeMap<String, PropertyValue>,
}

impl Block {
    fn new(opened_at: usize) -> Self {
        Self {
            opened_at,
            ssid: String::new(),
            priority: 0,
            properties: BTreeMap::new(),
        }
    }

    fn assign(&mut self, key: &str, value: PropertyValue, line: usize) -> Result<()> {
        match key {
            "ssid" => self.ssid = value.to_string(),
            "priority" => {
                self.priority = value.as_integer().ok_or_else(|| {
                    Error::malformed(line, format!("priority must be an integer, got '{}'", value))
                })?;
            }
            _ => {
                self.properties.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    fn into_record(self, number: u32) -> NetworkRecord {
        NetworkRecord {
            ssid: self.ssid,
            number: Some(number),
            priority: self.priority,
            properties: self.properties,
        }
    }
}

/// Parse configuration text into network records, in file order.
pub fn parse(text: &str) -> Result<Vec<NetworkRecord>> {
    let mut networks: Vec<NetworkRecord> = Vec::new();
    let mut block: Option<Block> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let bare = structural(line);

        match block.take() {
            None => {
                if NETWORK_OPEN.is_match(bare) {
                    block = Some(Block::new(line_no));
                } else if bare == "}" {
                    return Err(Error::malformed(line_no, "'}' without an open network block"));
                } else {
                    // Global settings are validated but not kept.
                    parse_assignment(line, line_no)?;
                }
            }
            Some(mut current) => {
                if bare == "}" {
                    let number = networks.len() as u32;
                    networks.push(current.into_record(number));
                } else if NETWORK_OPEN.is_match(bare) {
                    return Err(Error::malformed(
                        line_no,
                        format!("network block opened inside block from line {}", current.opened_at),
                    ));
                } else {
                    let (key, value) = parse_assignment(line, line_no)?;
                    current.assign(key, value, line_no)?;
                    block = Some(current);
                }
            }
        }
    }

    if let Some(unclosed) = block {
        return Err(Error::malformed(unclosed.opened_at, "network block is never closed"));
    }

    debug!("Parsed {} network block(s)", networks.len());
    Ok(networks)
}

/// Line with any trailing comment removed, for matching block delimiters.
fn structural(line: &str) -> &str {
    if line.contains('"') {
        return line;
    }
    line.split('#').next().unwrap_or_default().trim_end()
}

/// Read and parse a configuration file.
pub fn parse_file(path: &Path) -> Result<Vec<NetworkRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn parse_assignment(line: &str, line_no: usize) -> Result<(&str, PropertyValue)> {
    let caps = ASSIGNMENT
        .captures(line)
        .ok_or_else(|| Error::malformed(line_no, format!("expected key=value, got '{}'", line)))?;

    let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    Ok((key, parse_value(raw, line_no)?))
}

fn parse_value(raw: &str, line_no: usize) -> Result<PropertyValue> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix('"') {
        let end = rest
            .find('"')
            .ok_or_else(|| Error::malformed(line_no, "unterminated quoted value"))?;
        let trailing = rest[end + 1..].trim();
        if !trailing.is_empty() && !trailing.starts_with('#') {
            return Err(Error::malformed(
                line_no,
                format!("unexpected '{}' after quoted value", trailing),
            ));
        }
        return Ok(PropertyValue::Text(rest[..end].to_string()));
    }

    // Unquoted values end at the first '#'.
    let raw = raw.split('#').next().unwrap_or_default().trim_end();

    if INTEGER.is_match(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(PropertyValue::Integer(n));
        }
    }

    Ok(PropertyValue::Text(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
# Managed by hand
ctrl_interface=DIR=/var/run/wpa_supplicant GROUP=netdev
update_config=1
country=GB

network={
    ssid="Home"
    psk="correct horse"
    priority=10
}

network={
    ssid="Office Guest"   # visitors
    key_mgmt=NONE
    priority=20
}

# network={
#     ssid="Old"
# }

network = {
    ssid="Cafe"
    priority=1
}
"#;

    #[test]
    fn test_parse_numbers_blocks_in_file_order() {
        let networks = parse(SAMPLE).expect("sample should parse");
        assert_eq!(networks.len(), 3);

        let summary: Vec<(Option<u32>, &str, i64)> = networks
            .iter()
            .map(|n| (n.number, n.ssid.as_str(), n.priority))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(0), "Home", 10),
                (Some(1), "Office Guest", 20),
                (Some(2), "Cafe", 1),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_other_properties() {
        let networks = parse(SAMPLE).expect("sample should parse");
        assert_eq!(
            networks[0].property("psk"),
            Some(&PropertyValue::Text("correct horse".to_string()))
        );
        assert_eq!(
            networks[1].property("key_mgmt"),
            Some(&PropertyValue::Text("NONE".to_string()))
        );
        assert!(networks[0].property("ssid").is_none());
        assert!(networks[0].property("priority").is_none());
    }

    #[test]
    fn test_last_priority_wins() {
        let networks = parse("network={\n ssid=\"A\"\n priority=3\n priority=7\n}\n")
            .expect("duplicate priority should parse");
        assert_eq!(networks[0].priority, 7);
    }

    #[test]
    fn test_trailing_comment_after_unquoted_values() {
        let networks = parse(
            "network={\n ssid=\"Home\"\n priority=10 # preferred\n key_mgmt=NONE # open\n scan_ssid=1#hidden\n}\n",
        )
        .expect("inline comments should be ignored");
        assert_eq!(networks[0].priority, 10);
        assert_eq!(
            networks[0].property("key_mgmt"),
            Some(&PropertyValue::Text("NONE".to_string()))
        );
        assert_eq!(networks[0].property("scan_ssid"), Some(&PropertyValue::Integer(1)));
    }

    #[test]
    fn test_trailing_comment_after_block_delimiters() {
        let networks = parse("network={ # home\n ssid=\"Home\"\n} # end\n")
            .expect("comments after delimiters should be ignored");
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].ssid, "Home");
    }

    #[test]
    fn test_missing_priority_defaults_to_zero() {
        let networks = parse("network={\nssid=\"A\"\n}\n").expect("should parse");
        assert_eq!(networks[0].priority, 0);
    }

    #[test]
    fn test_integer_and_bare_values() {
        let networks = parse("network={\nssid=1234\nscan_ssid=1\nbgscan=simple:30:-65:300\n}")
            .expect("should parse");
        assert_eq!(networks[0].ssid, "1234");
        assert_eq!(networks[0].property("scan_ssid"), Some(&PropertyValue::Integer(1)));
        assert_eq!(
            networks[0].property("bgscan"),
            Some(&PropertyValue::Text("simple:30:-65:300".to_string()))
        );
    }

    #[test]
    fn test_empty_input_has_no_networks() {
        assert!(parse("").expect("empty text parses").is_empty());
        assert!(parse("# only a comment\nupdate_config=1\n")
            .expect("globals parse")
            .is_empty());
    }

    #[test]
    fn test_unclosed_block_is_rejected() {
        let err = parse("network={\n ssid=\"A\"\n priority=1\n").unwrap_err();
        assert!(err.is_malformed_config());
        assert!(matches!(err, Error::MalformedConfig { line: 1, .. }));
    }

    #[test]
    fn test_assignment_without_equals_is_rejected() {
        let err = parse("network={\n ssid \"A\"\n}\n").unwrap_err();
        assert!(matches!(err, Error::MalformedConfig { line: 2, .. }));

        let err = parse("update_config\n").unwrap_err();
        assert!(matches!(err, Error::MalformedConfig { line: 1, .. }));
    }

    #[test]
    fn test_structural_errors_return_no_partial_result() {
        let text = "network={\nssid=\"A\"\n}\n}\n";
        assert!(matches!(parse(text), Err(Error::MalformedConfig { line: 4, .. })));

        let nested = "network={\nnetwork={\n}\n}\n";
        assert!(matches!(parse(nested), Err(Error::MalformedConfig { line: 2, .. })));
    }

    #[test]
    fn test_bad_quotes_and_priority_are_rejected() {
        assert!(parse("network={\nssid=\"A\n}\n").is_err());
        assert!(parse("network={\nssid=\"A\" extra\n}\n").is_err());
        assert!(parse("network={\nssid=\"A\"\npriority=high\n}\n").is_err());
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", SAMPLE).expect("write sample");

        let networks = parse_file(file.path()).expect("file should parse");
        assert_eq!(networks.len(), 3);
        assert_eq!(networks[2].ssid, "Cafe");
    }
}
