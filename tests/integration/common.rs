//! Shared fixtures for integration tests

use url::Url;
use vosdroits::{Config, SiteClient, SiteId};
use wiremock::{MockServer, ResponseTemplate};

/// Default configuration with pacing shortened for tests
pub fn test_config(delay_ms: u64) -> Config {
    let mut config = Config::default();
    config.client.request_timeout_secs = 5;
    config.politeness.minimum_delay_ms = delay_ms;
    config
}

/// Client for a built-in site re-targeted at the mock server
pub fn client_for(server: &MockServer, id: SiteId) -> SiteClient {
    client_with(server, id, test_config(10))
}

pub fn client_with(server: &MockServer, id: SiteId, config: Config) -> SiteClient {
    let base = Url::parse(&server.uri()).expect("mock server uri");
    SiteClient::new(&config, id.profile().with_base_url(base)).expect("client")
}

/// 200 response carrying an HTML body
pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}
