//! Utility functions and helpers.

pub mod address;
pub mod http;

pub use address::extract_address;
