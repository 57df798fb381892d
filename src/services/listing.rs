// src/services/listing.rs

//! Listing-page site adapter.
//!
//! Fetches a server listing page and turns each listing row, selected by a
//! configured CSS selector, into one raw candidate record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::SiteConfig;
use crate::services::{FetchReport, RawRecord, SiteAdapter};

/// Adapter for a single listing site.
pub struct ListingScraper {
    client: Client,
    site: SiteConfig,
}

impl ListingScraper {
    /// Create an adapter for the given site, sharing the HTTP client.
    pub fn new(client: Client, site: SiteConfig) -> Self {
        Self { client, site }
    }

    async fn try_fetch(&self) -> Result<Vec<RawRecord>> {
        let mut request = self.client.get(&self.site.url);
        if let Some(secs) = self.site.timeout_secs {
            request = request.timeout(Duration::from_secs(secs));
        }

        let html = request.send().await?.error_for_status()?.text().await?;
        parse_listing(&html, &self.site.row_selector, self.site.name())
    }
}

#[async_trait]
impl SiteAdapter for ListingScraper {
    fn site(&self) -> &str {
        self.site.name()
    }

    async fn fetch(&self) -> FetchReport {
        match self.try_fetch().await {
            Ok(records) => FetchReport::ok(self.site(), records),
            Err(error) => FetchReport::failed(self.site(), error.to_string()),
        }
    }
}

/// Parse a fetched listing page into raw records, one per listing row.
///
/// Rows whose text collapses to nothing are skipped.
pub fn parse_listing(html: &str, row_selector: &str, site: &str) -> Result<Vec<RawRecord>> {
    let row_sel = parse_selector(row_selector)?;
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for row in document.select(&row_sel) {
        let text = normalize_whitespace(&row.text().collect::<Vec<_>>().join(" "));
        if text.is_empty() {
            continue;
        }
        records.push(RawRecord {
            site: site.to_string(),
            text,
        });
    }
    Ok(records)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
