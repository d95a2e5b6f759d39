use url::Url;

/// Extracts the lowercase host of a URL
///
/// The port is not part of the result.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use vosdroits::url::extract_domain;
///
/// let url = Url::parse("https://WWW.Impots.Gouv.FR/particulier").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.impots.gouv.fr".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}
