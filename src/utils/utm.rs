//! UTM campaign parameter builder.
//!
//! Pure functions: given a platform and the target's campaign term, produce
//! the ordered UTM key/value pairs and their RFC 3986 query-string form.

use crate::domain::entities::Platform;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters gets percent-encoded.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Site-wide campaign settings feeding the UTM builder.
#[derive(Debug, Clone)]
pub struct UtmConfig {
    /// `utm_id`: stable campaign identifier.
    pub utm_id: String,
    /// `utm_campaign`: configured campaign name.
    pub campaign: String,
    /// Site name; serialized as `utm_source_platform` with a fixed suffix.
    pub site_name: String,
}

/// Builds the ordered UTM pairs for a share link.
///
/// Output is deterministic for a given (platform, config) pair except for
/// `term`, which tracks mutable per-object configuration. An empty term is
/// kept as an empty value rather than omitted.
pub fn build_pairs(platform: Platform, term: &str, config: &UtmConfig) -> Vec<(&'static str, String)> {
    vec![
        ("utm_id", config.utm_id.clone()),
        ("utm_source", platform.key().to_string()),
        ("utm_medium", platform.medium().to_string()),
        ("utm_campaign", config.campaign.clone()),
        (
            "utm_source_platform",
            format!("{} Website", config.site_name),
        ),
        ("utm_content", "socialized-share-link".to_string()),
        ("utm_term", term.to_string()),
        ("utm_creative_format", "user-share-link".to_string()),
        ("utm_marketing_tactic", "prospecting".to_string()),
    ]
}

/// Serializes pairs to a query string, percent-encoding keys and values per
/// RFC 3986.
pub fn to_query_string(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_COMPONENT),
                utf8_percent_encode(v, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Convenience wrapper: build and serialize in one step.
pub fn query_string(platform: Platform, term: &str, config: &UtmConfig) -> String {
    to_query_string(&build_pairs(platform, term, config))
}

/// Appends a query string to a URL, honoring an existing `?`.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}
