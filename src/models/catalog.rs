//! Persisted catalog aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServerRecord;

/// Marker describing how the last persisted run ended.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    #[default]
    Completed,
}

/// The full persisted collection of server records plus metadata.
///
/// Field order here matches the on-disk layout consumed by the listing
/// website: servers, then lastUpdated, then scrapeStatus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// Ordered sequence of server records
    #[serde(default)]
    pub servers: Vec<ServerRecord>,

    /// Timestamp of the most recent successful save
    #[serde(
        rename = "lastUpdated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,

    /// Outcome marker of the last save
    #[serde(rename = "scrapeStatus", default)]
    pub scrape_status: ScrapeStatus,
}

impl Catalog {
    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// True when the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
