//! Search listing extraction

use super::text::{element_text, first_text, resolve_link};
use super::{compile_selector, SearchResult};
use crate::crawler::CrawlSession;
use crate::site::SearchRules;
use scraper::Html;
use url::Url;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// Clamps a caller-supplied limit
///
/// Values outside `1..=100` fall back to the default of 10 rather than the nearest bound.
pub fn clamp_limit(limit: i64) -> usize {
    if (1..=MAX_LIMIT as i64).contains(&limit) {
        limit as usize
    } else {
        DEFAULT_LIMIT
    }
}

/// Extracts search hits in document order until `limit` records are collected
///
/// Candidates without a link or a title are skipped, as are candidates whose URL was
/// already collected. The site's listing can repeat a URL; only its first position is
/// kept, so the output is not always one record per listed candidate.
pub fn extract_search_results(
    rules: &SearchRules,
    document: &Html,
    base_url: &Url,
    limit: usize,
    session: &mut CrawlSession<SearchResult>,
) {
    let Some(candidate_sel) = compile_selector(rules.candidate, session) else {
        return;
    };
    let Some(link_sel) = compile_selector(rules.link, session) else {
        return;
    };
    let inner_sel = compile_selector(rules.title_inner, session);
    let outer_sel = compile_selector(rules.title_outer, session);
    let description_sel = compile_selector(rules.description, session);
    let kind_sel = rules.kind.and_then(|raw| compile_selector(raw, session));
    let date_sel = rules.date.and_then(|raw| compile_selector(raw, session));

    for candidate in document.select(&candidate_sel) {
        if session.len() >= limit {
            break;
        }

        let Some(url) = candidate
            .select(&link_sel)
            .find_map(|link| link.value().attr("href"))
            .and_then(|href| resolve_link(href, base_url))
        else {
            continue;
        };

        let title = inner_sel
            .as_ref()
            .and_then(|sel| first_text(&candidate, sel))
            .or_else(|| outer_sel.as_ref().and_then(|sel| first_text(&candidate, sel)));
        let Some(title) = title else {
            tracing::trace!("Skipping search candidate without title: {}", url);
            continue;
        };

        let description = description_sel
            .as_ref()
            .and_then(|sel| first_text(&candidate, sel))
            .unwrap_or_default();
        let kind = kind_sel.as_ref().and_then(|sel| first_text(&candidate, sel));
        let date = date_sel.as_ref().and_then(|sel| first_text(&candidate, sel));

        let kept = session.push_unique_by(
            SearchResult {
                title,
                url: url.to_string(),
                description,
                kind,
                date,
            },
            |a, b| a.url == b.url,
        );
        if !kept {
            tracing::trace!("Skipping duplicate search candidate: {}", element_text(&candidate));
        }
    }
}
