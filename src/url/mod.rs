//! URL handling module for VosDroits
//!
//! This module validates caller-supplied URLs against a Site Profile's allow-list,
//! turns site-relative paths into absolute URLs and classifies document identifiers.

mod domain;
mod identifier;
mod matcher;

use crate::site::SiteProfile;
use crate::VosDroitsError;
use url::Url;

// Re-export main functions
pub use domain::extract_domain;
pub use identifier::{document_id, require_content_sheet, IdentifierClass};
pub use matcher::matches_allowed_host;

/// Validates a URL against a site and returns its canonical form
///
/// # Rules
///
/// 1. Empty input is rejected with `UrlInvalid`
/// 2. Input without a host must be a site-relative path (`/...`); it is resolved
///    against the site's base URL
/// 3. Only `http` and `https` URLs are accepted
/// 4. The host must be on the allow-list, compared case-insensitively, with or
///    without a leading `www.`; otherwise `DomainMismatch`
/// 5. The fragment is dropped
///
/// # Examples
///
/// ```
/// use vosdroits::site::SiteProfile;
/// use vosdroits::url::validate_url;
///
/// let site = SiteProfile::impots();
/// let relative = validate_url("/particulier/questions", &site).unwrap();
/// let absolute = validate_url("https://www.impots.gouv.fr/particulier/questions", &site).unwrap();
/// assert_eq!(relative, absolute);
///
/// assert!(validate_url("https://example.com/page", &site).is_err());
/// ```
pub fn validate_url(raw: &str, site: &SiteProfile) -> Result<Url, VosDroitsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(VosDroitsError::UrlInvalid("URL cannot be empty".to_string()));
    }

    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => resolve_relative(raw, site)?,
        Err(e) => return Err(VosDroitsError::UrlInvalid(format!("{raw}: {e}"))),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(VosDroitsError::UrlInvalid(format!(
            "{raw}: only HTTP and HTTPS URLs are supported"
        )));
    }

    let host = extract_domain(&url)
        .ok_or_else(|| VosDroitsError::UrlInvalid(format!("{raw}: missing host")))?;

    if !site
        .allowed_hosts
        .iter()
        .any(|allowed| matches_allowed_host(allowed, &host))
    {
        return Err(VosDroitsError::DomainMismatch {
            host,
            expected: site.display_name.clone(),
        });
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves a host-less input against the site's base URL
fn resolve_relative(raw: &str, site: &SiteProfile) -> Result<Url, VosDroitsError> {
    // "not-a-url" has no host and is not a path either
    if !raw.starts_with('/') || raw.starts_with("//") {
        return Err(VosDroitsError::UrlInvalid(format!(
            "{raw}: expected an absolute URL or a path starting with '/'"
        )));
    }

    site.base_url
        .join(raw)
        .map_err(|e| VosDroitsError::UrlInvalid(format!("{raw} after making absolute: {e}")))
}
