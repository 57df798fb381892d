//! Storage abstractions for catalog persistence.
//!
//! The catalog lives in a single JSON file read by the listing website.
//! Writes go through an atomic replace (write to temp, then rename) so a
//! reader never observes a half-written file.

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Catalog;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a successful catalog save.
#[derive(Debug, Clone)]
pub struct SaveReceipt {
    /// Number of records persisted
    pub server_count: usize,
    /// Timestamp stamped into the catalog
    pub timestamp: DateTime<Utc>,
    /// Where the catalog was written
    pub location: PathBuf,
}

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Load the persisted catalog.
    ///
    /// A missing file is an empty catalog, not an error. An unreadable or
    /// corrupt file is logged, preserved aside, and treated as empty.
    async fn load(&self) -> Result<Catalog>;

    /// Persist the catalog, stamping `lastUpdated` and `scrapeStatus`.
    ///
    /// On failure the previously persisted file is left untouched.
    async fn save(&self, catalog: &mut Catalog) -> Result<SaveReceipt>;
}
