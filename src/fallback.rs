//! Fallback resolver for list-shaped operations
//!
//! Search, category and life-event listings never come back empty: when the crawl
//! fails or finds nothing, a deterministic default is served instead. Cancellation is
//! the one error that always reaches the caller. Single-document lookups never use
//! this module.

use crate::crawler::CrawlOutcome;
use crate::extract::SearchResult;
use crate::site::SiteProfile;
use crate::VosDroitsError;

/// Suggestion carried by the synthetic search record
pub const SEARCH_SUGGESTION: &str =
    "Try modifying your search terms or visit the website directly.";

/// The single record returned when a search yields nothing
pub fn search_fallback(site: &SiteProfile, query: &str) -> Vec<SearchResult> {
    vec![SearchResult {
        title: format!("No results found for: {query}"),
        url: site.search_url(query).to_string(),
        description: SEARCH_SUGGESTION.to_string(),
        kind: Some("Info".to_string()),
        date: None,
    }]
}

/// Resolves a list crawl, substituting `fallback` for empty or failed outcomes
pub fn or_fallback<T, F>(
    outcome: CrawlOutcome<T>,
    what: &str,
    fallback: F,
) -> Result<Vec<T>, VosDroitsError>
where
    F: FnOnce() -> Vec<T>,
{
    match outcome {
        CrawlOutcome::Records(records) => Ok(records),
        CrawlOutcome::Failed(VosDroitsError::Cancelled) => Err(VosDroitsError::Cancelled),
        CrawlOutcome::Failed(error) => {
            tracing::warn!("Serving default {} after crawl failure: {}", what, error);
            Ok(fallback())
        }
        CrawlOutcome::Empty => {
            tracing::info!("Crawl found no {}, serving defaults", what);
            Ok(fallback())
        }
    }
}
