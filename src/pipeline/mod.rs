//! Pipeline entry points for scraper operations.
//!
//! - `merge`: Reconcile freshly scraped records against the existing catalog
//! - `run_scraper`: Full run: load, fetch each site, merge, save

pub mod merge;
pub mod scrape;

pub use merge::merge;
pub use scrape::{RunStats, run_scraper};
