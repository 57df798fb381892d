//! Server record data structure and field normalization.
//!
//! Listing sites describe servers as free text. `Region` and `Tag` derive
//! canonical values from that text by case-insensitive substring matching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hosting region of a listed server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Region {
    Spain,
    #[serde(rename = "United States")]
    UnitedStates,
    Germany,
    France,
    Argentina,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    Canada,
    Australia,
    Brazil,
    Mexico,
    Netherlands,
    Unknown,
}

/// Keyword lookup table. Order matters: the first keyword found in the
/// source text wins, regardless of where it appears in the text.
const REGION_KEYWORDS: &[(&str, Region)] = &[
    ("spain", Region::Spain),
    ("united states", Region::UnitedStates),
    ("usa", Region::UnitedStates),
    ("germany", Region::Germany),
    ("france", Region::France),
    ("argentina", Region::Argentina),
    ("uk", Region::UnitedKingdom),
    ("canada", Region::Canada),
    ("australia", Region::Australia),
    ("brazil", Region::Brazil),
    ("mexico", Region::Mexico),
    ("netherlands", Region::Netherlands),
];

impl Region {
    /// Derive a region from free text. Falls back to `Unknown`.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        REGION_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, region)| *region)
            .unwrap_or(Region::Unknown)
    }
}

/// Server type label from the fixed listing vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tag {
    Vanilla,
    #[serde(rename = "SMP")]
    Smp,
    #[serde(rename = "PvP")]
    Pvp,
    #[serde(rename = "PvE")]
    Pve,
    #[serde(rename = "MMORPG")]
    Mmorpg,
    Roleplay,
    Creative,
    MiniGames,
    Skyblock,
    Anarchy,
    Factions,
    Hardcore,
    Modded,
    Adventure,
}

impl Tag {
    /// Full vocabulary, in declared order.
    pub const ALL: [Tag; 14] = [
        Tag::Vanilla,
        Tag::Smp,
        Tag::Pvp,
        Tag::Pve,
        Tag::Mmorpg,
        Tag::Roleplay,
        Tag::Creative,
        Tag::MiniGames,
        Tag::Skyblock,
        Tag::Anarchy,
        Tag::Factions,
        Tag::Hardcore,
        Tag::Modded,
        Tag::Adventure,
    ];

    /// Lowercase keyword searched for in source text.
    fn keyword(&self) -> &'static str {
        match self {
            Tag::Vanilla => "vanilla",
            Tag::Smp => "smp",
            Tag::Pvp => "pvp",
            Tag::Pve => "pve",
            Tag::Mmorpg => "mmorpg",
            Tag::Roleplay => "roleplay",
            Tag::Creative => "creative",
            Tag::MiniGames => "minigames",
            Tag::Skyblock => "skyblock",
            Tag::Anarchy => "anarchy",
            Tag::Factions => "factions",
            Tag::Hardcore => "hardcore",
            Tag::Modded => "modded",
            Tag::Adventure => "adventure",
        }
    }

    /// Collect every tag whose keyword occurs in the text, in vocabulary
    /// order. Returns `[Vanilla]` when nothing matches; never empty.
    pub fn extract_all(text: &str) -> Vec<Tag> {
        let lower = text.to_lowercase();
        let found: Vec<Tag> = Tag::ALL
            .iter()
            .copied()
            .filter(|tag| lower.contains(tag.keyword()))
            .collect();

        if found.is_empty() {
            vec![Tag::Vanilla]
        } else {
            found
        }
    }
}

/// One listed game server.
///
/// Listing sites attach fields this scraper knows nothing about; those
/// survive load/merge/save verbatim through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerRecord {
    /// Network address or domain; the merge key when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Hosting region
    #[serde(default = "default_region")]
    pub region: Region,

    /// Server type tags, never empty after normalization
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Date the record was last touched by a run (YYYY-MM-DD)
    #[serde(
        rename = "lastUpdated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<NaiveDate>,

    /// Opaque fields preserved verbatim across merges
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_region() -> Region {
    Region::Unknown
}

impl ServerRecord {
    /// True when this record's address matches `address`, compared
    /// case-insensitively.
    pub fn matches_address(&self, address: &str) -> bool {
        self.address
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_matches_case_insensitively() {
        assert_eq!(Region::from_text("Hosted in GERMANY"), Region::Germany);
        assert_eq!(Region::from_text("great server, Brazil!"), Region::Brazil);
    }

    #[test]
    fn region_table_order_breaks_ties() {
        // "usa" precedes "germany" in the lookup table, so it wins even
        // though "Germany" appears first in the input.
        assert_eq!(
            Region::from_text("Germany or USA, pick one"),
            Region::UnitedStates
        );
    }

    #[test]
    fn region_defaults_to_unknown() {
        assert_eq!(Region::from_text("no location given"), Region::Unknown);
        assert_eq!(Region::from_text(""), Region::Unknown);
        assert_eq!(Region::from_text("   "), Region::Unknown);
    }

    #[test]
    fn region_serializes_display_names() {
        let json = serde_json::to_string(&Region::UnitedStates).unwrap();
        assert_eq!(json, "\"United States\"");
        let json = serde_json::to_string(&Region::UnitedKingdom).unwrap();
        assert_eq!(json, "\"United Kingdom\"");
    }

    #[test]
    fn tags_collects_all_matches_in_vocabulary_order() {
        let tags = Tag::extract_all("Hardcore PvP factions server");
        assert_eq!(tags, vec![Tag::Pvp, Tag::Factions, Tag::Hardcore]);
    }

    #[test]
    fn tags_fall_back_to_vanilla() {
        assert_eq!(Tag::extract_all("just a server"), vec![Tag::Vanilla]);
        assert_eq!(Tag::extract_all(""), vec![Tag::Vanilla]);
    }

    #[test]
    fn tags_serialize_vocabulary_names() {
        let json = serde_json::to_string(&vec![Tag::Smp, Tag::Pvp, Tag::Mmorpg]).unwrap();
        assert_eq!(json, "[\"SMP\",\"PvP\",\"MMORPG\"]");
    }

    #[test]
    fn record_preserves_unknown_fields() {
        let json = r#"{
            "address": "play.example.com",
            "region": "Spain",
            "tags": ["Vanilla"],
            "lastUpdated": "2026-08-01",
            "playerCount": 42,
            "website": "https://example.com"
        }"#;
        let record: ServerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["playerCount"], 42);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["website"], "https://example.com");
    }

    #[test]
    fn address_match_is_case_insensitive() {
        let record = ServerRecord {
            address: Some("Play.Example.Com".to_string()),
            region: Region::Unknown,
            tags: vec![Tag::Vanilla],
            last_updated: None,
            extra: serde_json::Map::new(),
        };
        assert!(record.matches_address("play.example.com"));
        assert!(!record.matches_address("other.example.com"));
    }
}
