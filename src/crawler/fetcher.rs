//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - Following redirects only inside the site's allow-list
//! - Racing the request against the caller's cancellation token
//! - Classifying the terminal status

use crate::config::Config;
use crate::site::SiteProfile;
use crate::url::matches_allowed_host;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects, used to resolve relative links
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// HTTP 404
    NotFound,

    /// Any other status >= 400
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Network error (connection refused, timeout, redirect outside the site, ...)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The cancellation token fired before the response was complete
    Cancelled,
}

/// Builds an HTTP client for one site
///
/// Redirects are followed up to 10 hops and only while they stay on the site's
/// allowed hosts.
///
/// # Example
///
/// ```no_run
/// use vosdroits::config::Config;
/// use vosdroits::crawler::build_http_client;
/// use vosdroits::site::SiteProfile;
///
/// let client = build_http_client(&Config::default(), &SiteProfile::impots()).unwrap();
/// ```
pub fn build_http_client(config: &Config, site: &SiteProfile) -> Result<Client, reqwest::Error> {
    let allowed_hosts = site.allowed_hosts.clone();

    let redirect_policy = Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error(format!("more than {MAX_REDIRECTS} redirects"));
        }
        let host = attempt.url().host_str().unwrap_or_default().to_string();
        if allowed_hosts
            .iter()
            .any(|allowed| matches_allowed_host(allowed, &host))
        {
            attempt.follow()
        } else {
            attempt.error(format!("redirect to disallowed host '{host}'"))
        }
    });

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.client.request_timeout())
        .connect_timeout(Duration::from_secs(10).min(config.client.request_timeout()))
        .redirect(redirect_policy)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, without retry
///
/// | Condition | Result |
/// |-----------|--------|
/// | Token already cancelled | `Cancelled`, no request sent |
/// | Token cancelled mid-flight | `Cancelled`, response dropped |
/// | HTTP 404 | `NotFound` |
/// | Other HTTP >= 400 | `HttpError` |
/// | Non-HTML Content-Type | `ContentMismatch` |
/// | Timeout / connection / redirect failure | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &Url, cancel: &CancellationToken) -> FetchResult {
    if cancel.is_cancelled() {
        return FetchResult::Cancelled;
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Fetch of {} abandoned after cancellation", url);
            FetchResult::Cancelled
        }
        result = send_and_read(client, url) => result,
    }
}

async fn send_and_read(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    let final_url = response.url().clone();

    if status == StatusCode::NOT_FOUND {
        return FetchResult::NotFound;
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("html") {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else if e.is_redirect() {
        format!("Redirect error: {e}")
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
