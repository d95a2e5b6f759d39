/// Checks if a host belongs to an allowed domain
///
/// An allowed domain matches its bare form and its `www.` form only; other
/// subdomains are rejected. Both sides are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use vosdroits::url::matches_allowed_host;
///
/// assert!(matches_allowed_host("impots.gouv.fr", "impots.gouv.fr"));
/// assert!(matches_allowed_host("impots.gouv.fr", "WWW.impots.gouv.fr"));
/// assert!(!matches_allowed_host("impots.gouv.fr", "api.impots.gouv.fr"));
/// ```
pub fn matches_allowed_host(allowed: &str, candidate: &str) -> bool {
    let allowed = allowed.to_lowercase();
    let allowed = allowed.strip_prefix("www.").unwrap_or(&allowed);
    let candidate = candidate.to_lowercase();

    if allowed.is_empty() {
        return false;
    }

    candidate == allowed || candidate.strip_prefix("www.") == Some(allowed)
}
