use crate::common::{client_with, html, test_config};
use std::time::{Duration, Instant};
use vosdroits::{CancellationToken, SiteId, VosDroitsError};
use wiremock::{Mock, MockServer};

const PAGE: &str = "<html><body><main><p>Une page de contenu suffisamment longue.</p></main></body></html>";

async fn mount_page(server: &MockServer) {
    Mock::given(wiremock::matchers::method("GET"))
        .respond_with(html(PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sequential_requests_respect_delay() {
    let server = MockServer::start().await;
    mount_page(&server).await;

    let client = client_with(&server, SiteId::ServicePublic, test_config(300));
    let cancel = CancellationToken::new();
    let url = format!("{}/particuliers/vosdroits/F1", server.uri());

    let started = Instant::now();
    client.get_document(&url, &cancel).await.unwrap();
    client.get_document(&url, &cancel).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn test_slow_response_still_leaves_full_delay() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::method("GET"))
        .respond_with(html(PAGE).set_delay(Duration::from_millis(600)))
        .mount(&server)
        .await;

    let client = client_with(&server, SiteId::ServicePublic, test_config(500));
    let cancel = CancellationToken::new();
    let url = format!("{}/particuliers/vosdroits/F1", server.uri());

    client.get_document(&url, &cancel).await.unwrap();
    let first_done = Instant::now();
    client.get_document(&url, &cancel).await.unwrap();

    // 500ms pause after the first response, then 600ms for the second one
    assert!(first_done.elapsed() >= Duration::from_millis(1100));
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_schedule() {
    let server = MockServer::start().await;
    mount_page(&server).await;

    let client = client_with(&server, SiteId::ServicePublic, test_config(200));
    let url = format!("{}/particuliers/vosdroits/F1", server.uri());

    let started = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..3 {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            client.get_document(&url, &CancellationToken::new()).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // Three requests need at least two full delays between them
    assert!(started.elapsed() >= Duration::from_millis(400));
    assert_eq!(client.request_count(), 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_cancel_while_waiting_for_slot() {
    let server = MockServer::start().await;
    mount_page(&server).await;

    let client = client_with(&server, SiteId::ServicePublic, test_config(5_000));
    let url = format!("{}/particuliers/vosdroits/F1", server.uri());

    client
        .get_document(&url, &CancellationToken::new())
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let result = client.get_document(&url, &cancel).await;

    assert!(matches!(result, Err(VosDroitsError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
