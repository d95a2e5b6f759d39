//! Document identifiers
//!
//! service-public.gouv.fr names pages by their last path segment: `F2726` is a content
//! sheet (a single leaf document), `N19808` is a category (navigation) page.

use crate::VosDroitsError;
use regex::Regex;
use url::Url;

/// Shape of a URL identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierClass {
    ContentSheet,
    Category,
    Other,
}

/// Last non-empty path segment of a URL
pub fn document_id(url: &Url) -> Option<&str> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
}

impl IdentifierClass {
    pub fn of(url: &Url, content_sheet: &Regex, category: &Regex) -> Self {
        match document_id(url) {
            Some(id) if content_sheet.is_match(id) => Self::ContentSheet,
            Some(id) if category.is_match(id) => Self::Category,
            _ => Self::Other,
        }
    }
}

/// Rejects any URL whose identifier is not a content sheet
pub fn require_content_sheet(
    url: &Url,
    content_sheet: &Regex,
    category: &Regex,
) -> Result<(), VosDroitsError> {
    let reason = match IdentifierClass::of(url, content_sheet, category) {
        IdentifierClass::ContentSheet => return Ok(()),
        IdentifierClass::Category => format!(
            "'{}' is a category page, a content sheet identifier is required",
            document_id(url).unwrap_or_default()
        ),
        IdentifierClass::Other => "URL does not name a content sheet".to_string(),
    };

    Err(VosDroitsError::InvalidTarget {
        url: url.to_string(),
        reason,
    })
}
