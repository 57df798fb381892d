// src/utils/address.rs

//! Server address extraction.

use std::sync::OnceLock;

use regex::Regex;

static DOMAIN_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Domain-shaped pattern: dot-separated labels of letters, digits and
/// hyphens, no leading or trailing hyphen per label, final label at least
/// two alphanumeric characters.
fn domain_pattern() -> &'static Regex {
    DOMAIN_PATTERN.get_or_init(|| {
        Regex::new(r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]{2,}")
            .expect("domain pattern is a valid regex")
    })
}

/// Extract the first domain-shaped address from free text.
///
/// Purely syntactic; does not check the address resolves or is reachable.
pub fn extract_address(text: &str) -> Option<String> {
    domain_pattern().find(text).map(|m| m.as_str().to_string())
}
