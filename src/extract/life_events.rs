//! Life-event listing extraction

use super::text::{element_text, resolve_link};
use super::{compile_selector, LifeEvent};
use crate::crawler::CrawlSession;
use crate::site::LifeEventListRules;
use scraper::Html;
use url::Url;

/// Extracts title and URL pairs from the themed life-event list
pub fn extract_life_events(
    rules: &LifeEventListRules,
    document: &Html,
    base_url: &Url,
    session: &mut CrawlSession<LifeEvent>,
) {
    let Some(link_sel) = compile_selector(rules.links, session) else {
        return;
    };

    for link in document.select(&link_sel) {
        let title = element_text(&link);
        let url = link
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, base_url));

        if let (false, Some(url)) = (title.is_empty(), url) {
            session.push_unique_by(
                LifeEvent {
                    title,
                    url: url.to_string(),
                },
                |a, b| a.title == b.title,
            );
        }
    }
}
