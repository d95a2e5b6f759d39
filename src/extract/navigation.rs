//! Category extraction from the site navigation

use super::text::{element_text, resolve_link};
use super::{compile_pattern, compile_selector, Category};
use crate::crawler::CrawlSession;
use crate::site::SiteProfile;
use scraper::Html;
use url::Url;

/// Extracts top-level categories from the navigation links
///
/// A link is kept when it has text and a target, its text is not excluded
/// ("Accueil"), and its resolved path matches the site's category pattern.
/// Names are deduplicated; the first occurrence wins.
pub fn extract_categories(
    site: &SiteProfile,
    document: &Html,
    base_url: &Url,
    session: &mut CrawlSession<Category>,
) {
    let rules = &site.rules.navigation;
    let Some(link_sel) = compile_selector(rules.links, session) else {
        return;
    };
    let Some(category_path) = compile_pattern(rules.category_path, session) else {
        return;
    };

    for link in document.select(&link_sel) {
        let name = element_text(&link);
        if name.is_empty() || rules.excluded_names.contains(&name.as_str()) {
            continue;
        }

        let Some(url) = link
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, base_url))
        else {
            continue;
        };

        if !category_path.is_match(url.path()) {
            tracing::trace!("Skipping non-category navigation link: {}", url);
            continue;
        }

        let description = link
            .value()
            .attr("title")
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| site.describe_category(&name));

        session.push_unique_by(
            Category {
                name,
                description,
                url: Some(url.to_string()),
            },
            |a, b| a.name == b.name,
        );
    }
}
