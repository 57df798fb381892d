// src/models/mod.rs

//! Domain models for the scraper application.

mod catalog;
mod config;
mod server;

// Re-export all public types
pub use catalog::{Catalog, ScrapeStatus};
pub use config::{Config, OutputConfig, ScraperConfig, SiteConfig};
pub use server::{Region, ServerRecord, Tag};
