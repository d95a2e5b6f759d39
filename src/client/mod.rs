//! Public operations over one Site Profile
//!
//! [`SiteClient`] is what an outer layer (the CLI, a tool-calling server) talks to.
//! Every operation first checks the cancellation token, validates its input before
//! any network activity, performs at most one fetch, and either degrades to defaults
//! (list operations) or surfaces an error (single-document operations).

use crate::config::Config;
use crate::crawler::{CrawlOutcome, Coordinator};
use crate::extract::{
    clamp_limit, extract_article, extract_categories, extract_life_event_detail,
    extract_life_events, extract_search_results, Article, Category, LifeEvent, LifeEventDetail,
    SearchResult,
};
use crate::fallback::{or_fallback, search_fallback};
use crate::site::{LifeEventRules, SiteId, SiteProfile};
use crate::url::{require_content_sheet, validate_url};
use crate::{Result, VosDroitsError};
use regex::Regex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Client for one target site; cheap to clone, clones share the site's scheduler
#[derive(Debug, Clone)]
pub struct SiteClient {
    coordinator: Arc<Coordinator>,
}

impl SiteClient {
    pub fn new(config: &Config, site: SiteProfile) -> Result<Self> {
        Ok(Self {
            coordinator: Arc::new(Coordinator::new(config, site)?),
        })
    }

    /// Client for a built-in site
    pub fn for_site(config: &Config, id: SiteId) -> Result<Self> {
        Self::new(config, id.profile())
    }

    pub fn site(&self) -> &SiteProfile {
        self.coordinator.site()
    }

    /// Number of HTTP requests issued so far through this client
    pub fn request_count(&self) -> u64 {
        self.coordinator.scheduler().request_count()
    }

    /// Searches the site
    ///
    /// `limit` outside `1..=100` behaves as 10. Never returns an empty list: when the
    /// crawl fails or finds nothing, a single "No results found" record pointing at the
    /// search URL is returned.
    pub async fn search(
        &self,
        query: &str,
        limit: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>> {
        ensure_active(cancel)?;

        let limit = clamp_limit(limit);
        let site = self.site();
        let url = site.search_url(query);

        let outcome = self
            .coordinator
            .crawl(&url, cancel, |site, document, base, session| {
                extract_search_results(&site.rules.search, document, base, limit, session)
            })
            .await;

        let results = or_fallback(outcome, "search results", || search_fallback(site, query))?;
        tracing::debug!("Search '{}' on {} returned {} results", query, site.id, results.len());
        Ok(results)
    }

    /// Fetches one document
    ///
    /// Fails with `NoContent` when the page has no usable body; a missing title is
    /// replaced by a placeholder.
    pub async fn get_document(&self, url: &str, cancel: &CancellationToken) -> Result<Article> {
        ensure_active(cancel)?;

        let site = self.site();
        let url = validate_url(url, site)?;

        let outcome = self
            .coordinator
            .crawl(&url, cancel, |site, document, _, session| {
                extract_article(&site.rules.article, document, &url, session)
            })
            .await;

        let mut article = single_record(outcome, &url)?;
        if article.content.is_empty() {
            return Err(VosDroitsError::NoContent {
                url: url.to_string(),
            });
        }
        if article.title.is_empty() {
            article.title = site.placeholder_title();
        }
        Ok(article)
    }

    /// Lists top-level categories, falling back to the site's defaults
    pub async fn list_categories(&self, cancel: &CancellationToken) -> Result<Vec<Category>> {
        ensure_active(cancel)?;

        let site = self.site();
        let url = site.categories_url();

        let outcome = self
            .coordinator
            .crawl(&url, cancel, |site, document, base, session| {
                extract_categories(site, document, base, session)
            })
            .await;

        or_fallback(outcome, "categories", || site.default_categories.clone())
    }

    /// Lists life events, falling back to the site's defaults
    pub async fn list_life_events(&self, cancel: &CancellationToken) -> Result<Vec<LifeEvent>> {
        ensure_active(cancel)?;

        let site = self.site();
        let rules = self.life_event_rules()?;
        let url = site.life_events_url().ok_or_else(|| {
            VosDroitsError::UrlInvalid(format!("{}{}", site.base_url, rules.list.path))
        })?;

        let outcome = self
            .coordinator
            .crawl(&url, cancel, |_, document, base, session| {
                extract_life_events(&rules.list, document, base, session)
            })
            .await;

        or_fallback(outcome, "life events", || site.default_life_events.clone())
    }

    /// Fetches a life-event guide
    ///
    /// The URL must name a content sheet; a category identifier is rejected with
    /// `InvalidTarget` before any request is made.
    pub async fn get_life_event_detail(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<LifeEventDetail> {
        ensure_active(cancel)?;

        let site = self.site();
        let rules = self.life_event_rules()?;
        let url = validate_url(url, site)?;

        let content_sheet = compile(rules.detail.content_sheet_id)?;
        let category = compile(rules.detail.category_id)?;
        require_content_sheet(&url, &content_sheet, &category)?;

        let outcome = self
            .coordinator
            .crawl(&url, cancel, |site, document, _, session| {
                extract_life_event_detail(&site.rules.article, &rules.detail, document, &url, session)
            })
            .await;

        let mut detail = single_record(outcome, &url)?;
        if detail.introduction.is_empty() && detail.sections.is_empty() {
            return Err(VosDroitsError::NoContent {
                url: url.to_string(),
            });
        }
        if detail.title.is_empty() {
            detail.title = site.placeholder_title();
        }
        Ok(detail)
    }

    fn life_event_rules(&self) -> Result<&LifeEventRules> {
        let site = self.site();
        site.rules
            .life_events
            .as_ref()
            .ok_or_else(|| VosDroitsError::Unsupported {
                site: site.display_name.clone(),
                operation: "life events".to_string(),
            })
    }
}

fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(VosDroitsError::Cancelled);
    }
    Ok(())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| VosDroitsError::Selector {
        selector: pattern.to_string(),
        message: e.to_string(),
    })
}

/// The one record of a single-document crawl
fn single_record<T>(outcome: CrawlOutcome<T>, url: &url::Url) -> Result<T> {
    match outcome {
        CrawlOutcome::Records(records) => records.into_iter().next().ok_or_else(|| {
            VosDroitsError::NoContent {
                url: url.to_string(),
            }
        }),
        CrawlOutcome::Empty => Err(VosDroitsError::NoContent {
            url: url.to_string(),
        }),
        CrawlOutcome::Failed(error) => Err(error),
    }
}
