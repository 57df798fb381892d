// src/pipeline/scrape.rs

//! Scrape run orchestrator.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::merge;
use crate::services::{ListingScraper, RawRecord, SiteAdapter};
use crate::storage::CatalogStorage;
use crate::utils::http;

/// Summary of a scrape run.
#[derive(Debug)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sites_total: usize,
    pub sites_failed: usize,
    pub records_scraped: usize,
    pub catalog_size: usize,
}

/// Run the scraper: load the catalog, fetch every configured site, merge
/// and save.
///
/// Sites are fetched sequentially and independently; one site's failure
/// degrades to zero records with a logged diagnostic and has no effect on
/// the others or on previously persisted data. An error is returned only
/// when the final save fails.
pub async fn run_scraper(config: &Config, storage: &dyn CatalogStorage) -> Result<RunStats> {
    let start_time = Utc::now();
    log::info!("Starting Hytale server scrape at {}", start_time);

    let existing = storage.load().await?;
    log::info!("Loaded {} existing servers", existing.len());

    let client = http::create_async_client(&config.scraper)?;
    let delay = Duration::from_millis(config.scraper.request_delay_ms);

    let mut records: Vec<RawRecord> = Vec::new();
    let mut sites_failed = 0;

    for site in &config.sites {
        let adapter = ListingScraper::new(client.clone(), site.clone());
        let report = adapter.fetch().await;

        match &report.diagnostic {
            Some(diagnostic) => {
                sites_failed += 1;
                log::warn!("{}: {}", report.site, diagnostic);
            }
            None => {
                log::info!("{}: {} candidate records", report.site, report.records.len());
            }
        }
        records.extend(report.records);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let records_scraped = records.len();
    let today = Utc::now().date_naive();
    let mut catalog = merge(existing, &records, today);

    let receipt = storage.save(&mut catalog).await?;
    log::info!(
        "Saved {} servers to {}",
        receipt.server_count,
        receipt.location.display()
    );

    Ok(RunStats {
        start_time,
        end_time: Utc::now(),
        sites_total: config.sites.len(),
        sites_failed,
        records_scraped,
        catalog_size: receipt.server_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteConfig;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn config_with_sites(sites: Vec<SiteConfig>, output: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.sites = sites;
        config.output.file = output.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn run_with_unreachable_site_still_saves() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("servers.json");

        // A connection to a reserved port on localhost fails fast; the run
        // must degrade to an empty batch and still persist the catalog.
        let site = SiteConfig {
            url: "http://127.0.0.1:9".to_string(),
            row_selector: "div.server-card".to_string(),
            timeout_secs: Some(1),
        };
        let config = config_with_sites(vec![site], &output);
        let storage = LocalStorage::new(&output);

        let stats = run_scraper(&config, &storage).await.unwrap();
        assert_eq!(stats.sites_total, 1);
        assert_eq!(stats.sites_failed, 1);
        assert_eq!(stats.records_scraped, 0);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn run_preserves_previously_persisted_records() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("servers.json");
        tokio::fs::write(
            &output,
            r#"{
                "servers": [
                    { "address": "old.example.com", "region": "Spain",
                      "tags": ["Vanilla"], "lastUpdated": "2026-01-01" }
                ],
                "lastUpdated": "2026-01-01T00:00:00Z",
                "scrapeStatus": "completed"
            }"#,
        )
        .await
        .unwrap();

        let site = SiteConfig {
            url: "http://127.0.0.1:9".to_string(),
            row_selector: "div.server-card".to_string(),
            timeout_secs: Some(1),
        };
        let config = config_with_sites(vec![site], &output);
        let storage = LocalStorage::new(&output);

        let stats = run_scraper(&config, &storage).await.unwrap();
        assert_eq!(stats.catalog_size, 1);

        let reloaded = storage.load().await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.servers[0].address.as_deref(),
            Some("old.example.com")
        );
        assert_eq!(
            reloaded.servers[0].last_updated,
            Some(Utc::now().date_naive())
        );
    }
}
