//! Service layer for the scraper application.
//!
//! Site adapters fetch candidate server records from listing sites. An
//! adapter never lets a failure escape its own boundary: network, timeout
//! and parse errors degrade to an empty record batch with a diagnostic.

mod listing;

pub use listing::ListingScraper;

use async_trait::async_trait;

/// One candidate server as scraped: unstructured text from a listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Site the record came from
    pub site: String,

    /// Free-text fragment describing the server
    pub text: String,
}

/// Typed outcome of one site fetch.
///
/// A failed fetch carries zero records plus a diagnostic message; the
/// orchestrator aggregates diagnostics instead of aborting the run.
#[derive(Debug)]
pub struct FetchReport {
    /// Site identifier
    pub site: String,

    /// Candidate records produced by the site
    pub records: Vec<RawRecord>,

    /// Failure diagnostic, if the fetch degraded to zero records
    pub diagnostic: Option<String>,
}

impl FetchReport {
    /// Successful fetch.
    pub fn ok(site: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            site: site.into(),
            records,
            diagnostic: None,
        }
    }

    /// Failed fetch, degraded to zero records.
    pub fn failed(site: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            records: Vec::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// True when the fetch degraded to a diagnostic.
    pub fn is_failure(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// A source-specific fetcher producing raw candidate records.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Site identifier used in diagnostics.
    fn site(&self) -> &str;

    /// Fetch candidate records. Must not fail past this boundary.
    async fn fetch(&self) -> FetchReport;
}
