//! Text normalization and fragment filtering

use scraper::{ElementRef, Selector};
use url::Url;

/// Fragments must be strictly longer than this many characters
pub const MIN_FRAGMENT_LEN: usize = 10;

/// Markers of navigation, consent banners and script hints
const BOILERPLATE_MARKERS: &[&str] = &["javascript", "Cookie", "Navigation"];

/// Collapsed text of an element
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first descendant matching `selector` that has any text
pub(crate) fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .map(|child| element_text(&child))
        .find(|text| !text.is_empty())
}

pub fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// Whether a content fragment survives the length and boilerplate filter
pub fn keep_fragment(text: &str) -> bool {
    text.chars().count() > MIN_FRAGMENT_LEN && !is_boilerplate(text)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}
