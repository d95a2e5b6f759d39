//! Crawler coordinator - runs one fetch/extract sequence per call
//!
//! The coordinator owns the pieces shared by every call to a site (HTTP client,
//! scheduler, profile) and drives a single call through them:
//! 1. Check the cancellation token
//! 2. Wait for the site's scheduler
//! 3. Fetch the page, racing the token
//! 4. Parse the HTML and run the extractor into a fresh session
//! 5. Discard everything if the token fired meanwhile

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::session::{CrawlOutcome, CrawlSession};
use crate::site::SiteProfile;
use crate::VosDroitsError;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Shared per-site crawl machinery
#[derive(Debug)]
pub struct Coordinator {
    site: Arc<SiteProfile>,
    client: Client,
    scheduler: Arc<Scheduler>,
}

impl Coordinator {
    /// Creates a coordinator for a site
    ///
    /// The configured politeness parameters replace the profile's own. Failing to build
    /// the HTTP client is an error, not a silent downgrade.
    pub fn new(config: &Config, site: SiteProfile) -> Result<Self, VosDroitsError> {
        let site = site.with_politeness(
            config.politeness.max_parallelism,
            std::time::Duration::from_millis(config.politeness.minimum_delay_ms),
        );
        let client = build_http_client(config, &site)?;
        let scheduler = Scheduler::new(
            site.id.as_str(),
            site.max_parallelism,
            site.request_delay,
        );

        tracing::debug!(
            "Coordinator ready for {} (parallelism {}, delay {:?})",
            site.display_name,
            site.max_parallelism,
            site.request_delay
        );

        Ok(Self {
            site: Arc::new(site),
            client,
            scheduler: Arc::new(scheduler),
        })
    }

    pub fn site(&self) -> &SiteProfile {
        &self.site
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Fetches `url` once and runs `extract` over the document
    ///
    /// `extract` receives the response's final URL for resolving relative links. It runs
    /// to completion even if the token fires during extraction, but its output is then
    /// discarded and the call fails with `Cancelled`.
    pub async fn crawl<T, F>(
        &self,
        url: &Url,
        cancel: &CancellationToken,
        extract: F,
    ) -> CrawlOutcome<T>
    where
        T: Send,
        F: FnOnce(&SiteProfile, &Html, &Url, &mut CrawlSession<T>) + Send,
    {
        if cancel.is_cancelled() {
            return CrawlOutcome::Failed(VosDroitsError::Cancelled);
        }

        let mut session = CrawlSession::new();

        let permit = match self.scheduler.acquire(cancel).await {
            Ok(permit) => permit,
            Err(e) => return CrawlOutcome::Failed(e),
        };

        tracing::debug!("Fetching {}", url);
        let result = fetch_url(&self.client, url, cancel).await;
        drop(permit);

        match result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} ({}, {} bytes)",
                    final_url,
                    status_code,
                    body.len()
                );
                let document = Html::parse_document(&body);
                extract(&self.site, &document, &final_url, &mut session);
            }
            FetchResult::NotFound => session.record_error(VosDroitsError::NotFound {
                url: url.to_string(),
            }),
            FetchResult::HttpError { status_code } => session.record_error(VosDroitsError::Http {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("{} is not HTML ({})", url, content_type);
                session.record_error(VosDroitsError::NoContent {
                    url: url.to_string(),
                });
            }
            FetchResult::NetworkError { error } => session.record_error(VosDroitsError::Fetch {
                url: url.to_string(),
                message: error,
            }),
            FetchResult::Cancelled => return CrawlOutcome::Failed(VosDroitsError::Cancelled),
        }

        if cancel.is_cancelled() {
            tracing::debug!(
                "Discarding {} records extracted from {} after cancellation",
                session.len(),
                url
            );
            return CrawlOutcome::Failed(VosDroitsError::Cancelled);
        }

        session.finish()
    }
}
