// src/pipeline/merge.rs

//! Catalog merge engine.
//!
//! Reconciles a batch of freshly scraped records against the previously
//! persisted catalog. Existing records are never deleted; candidates either
//! update a record with the same address or append as new entries.

use chrono::NaiveDate;

use crate::models::{Catalog, Region, ServerRecord, Tag};
use crate::services::RawRecord;
use crate::utils::extract_address;

/// Normalize one raw listing row into a candidate server record.
pub fn candidate_from_raw(raw: &RawRecord, today: NaiveDate) -> ServerRecord {
    ServerRecord {
        address: extract_address(&raw.text),
        region: Region::from_text(&raw.text),
        tags: Tag::extract_all(&raw.text),
        last_updated: Some(today),
        extra: serde_json::Map::new(),
    }
}

/// Merge scraped records into the existing catalog.
///
/// Every existing record's date is stamped to `today` even when no new
/// data supersedes it; consumers read that as a freshness signal. A
/// candidate whose address matches an existing record (case-insensitive,
/// first match) updates that record's normalized fields in place, leaving
/// its opaque fields and stored address untouched. Candidates without a
/// matching address, including those with no extractable address at all,
/// are appended after the existing records in arrival order.
pub fn merge(existing: Catalog, incoming: &[RawRecord], today: NaiveDate) -> Catalog {
    let Catalog {
        mut servers,
        last_updated,
        scrape_status,
    } = existing;

    for record in &mut servers {
        record.last_updated = Some(today);
    }

    for raw in incoming {
        let candidate = candidate_from_raw(raw, today);

        let slot = candidate
            .address
            .as_deref()
            .and_then(|address| servers.iter().position(|r| r.matches_address(address)));

        match slot {
            Some(index) => {
                let record = &mut servers[index];
                record.region = candidate.region;
                record.tags = candidate.tags;
                record.last_updated = Some(today);
            }
            None => servers.push(candidate),
        }
    }

    Catalog {
        servers,
        last_updated,
        scrape_status,
    }
}
