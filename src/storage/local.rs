//! Local filesystem catalog storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Catalog, ScrapeStatus};
use crate::storage::{CatalogStorage, SaveReceipt};

/// Local filesystem storage backend for the catalog file.
#[derive(Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage persisting to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the catalog bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Preserve an unreadable catalog file aside before treating it as
    /// empty, so a later save cannot silently destroy it.
    async fn preserve_corrupt(&self) {
        let aside = self.path.with_extension("json.bad");
        match tokio::fs::copy(&self.path, &aside).await {
            Ok(_) => log::warn!(
                "Unreadable catalog preserved at {}",
                aside.display()
            ),
            Err(e) => log::error!(
                "Failed to preserve unreadable catalog at {}: {}",
                aside.display(),
                e
            ),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn load(&self) -> Result<Catalog> {
        let bytes = match self.read_bytes().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("No catalog at {}, starting empty", self.path.display());
                return Ok(Catalog::default());
            }
            Err(e) => {
                log::error!("Failed to read catalog {}: {}", self.path.display(), e);
                self.preserve_corrupt().await;
                return Ok(Catalog::default());
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                log::error!("Corrupt catalog {}: {}", self.path.display(), e);
                self.preserve_corrupt().await;
                Ok(Catalog::default())
            }
        }
    }

    async fn save(&self, catalog: &mut Catalog) -> Result<SaveReceipt> {
        let now = Utc::now();
        catalog.last_updated = Some(now);
        catalog.scrape_status = ScrapeStatus::Completed;

        let bytes = serde_json::to_vec_pretty(catalog)?;
        self.write_bytes(&bytes).await?;

        Ok(SaveReceipt {
            server_count: catalog.len(),
            timestamp: now,
            location: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Region, ServerRecord, Tag};
    use tempfile::TempDir;

    fn sample_record(address: &str) -> ServerRecord {
        ServerRecord {
            address: Some(address.to_string()),
            region: Region::Germany,
            tags: vec![Tag::Pvp, Tag::Factions],
            last_updated: "2026-08-26".parse().ok(),
            extra: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("servers.json"));

        let catalog = storage.load().await.unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_records() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("data").join("servers.json"));

        let mut record = sample_record("play.example.com");
        record
            .extra
            .insert("playerCount".to_string(), serde_json::json!(128));

        let mut catalog = Catalog {
            servers: vec![record],
            ..Catalog::default()
        };
        let receipt = storage.save(&mut catalog).await.unwrap();
        assert_eq!(receipt.server_count, 1);

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.servers, catalog.servers);
        assert_eq!(loaded.scrape_status, ScrapeStatus::Completed);
        assert_eq!(loaded.servers[0].extra["playerCount"], 128);
    }

    #[tokio::test]
    async fn save_stamps_metadata() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("servers.json"));

        let mut catalog = Catalog::default();
        assert!(catalog.last_updated.is_none());

        storage.save(&mut catalog).await.unwrap();
        assert!(catalog.last_updated.is_some());
        assert_eq!(catalog.scrape_status, ScrapeStatus::Completed);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("servers.json");
        let storage = LocalStorage::new(&path);

        storage.save(&mut Catalog::default()).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_preserved_and_treated_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("servers.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let storage = LocalStorage::new(&path);
        let catalog = storage.load().await.unwrap();
        assert!(catalog.is_empty());
        assert!(path.with_extension("json.bad").exists());
    }

    #[tokio::test]
    async fn catalog_timestamp_is_monotonic_across_saves() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("servers.json"));

        let mut catalog = Catalog::default();
        let first = storage.save(&mut catalog).await.unwrap();
        let second = storage.save(&mut catalog).await.unwrap();
        assert!(second.timestamp >= first.timestamp);
    }
}
