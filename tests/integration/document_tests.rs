use crate::common::{client_for, client_with, html, request_count, test_config};
use std::time::Duration;
use vosdroits::{ArticleKind, CancellationToken, SiteId, VosDroitsError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PAGE: &str = r#"<html>
<head>
    <title>Passeport | Service Public</title>
    <meta property="og:description" content="Conditions et démarches">
</head>
<body>
    <nav class="fr-breadcrumb">Accueil Papiers Formulaire</nav>
    <main>
        <h1>Passeport</h1>
        <p class="fr-text--lead">Le passeport est un titre de voyage.</p>
        <p>Vous devez faire la demande en mairie.</p>
        <p>Court</p>
        <p>Activez le javascript pour continuer.</p>
        <p>Vous devez faire la demande en mairie.</p>
    </main>
</body>
</html>"#;

#[tokio::test]
async fn test_get_document_extracts_article() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particuliers/vosdroits/F1342"))
        .respond_with(html(ARTICLE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let url = format!("{}/particuliers/vosdroits/F1342", server.uri());
    let article = client
        .get_document(&url, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(article.title, "Passeport");
    assert_eq!(article.url, url);
    assert_eq!(article.kind, Some(ArticleKind::Form));
    assert_eq!(article.description.as_deref(), Some("Conditions et démarches"));
    assert_eq!(
        article.content,
        "Le passeport est un titre de voyage.\n\nVous devez faire la demande en mairie."
    );
}

#[tokio::test]
async fn test_get_document_accepts_relative_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particuliers/vosdroits/F1342"))
        .respond_with(html(ARTICLE_PAGE))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let article = client
        .get_document("/particuliers/vosdroits/F1342", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(article.title, "Passeport");
}

#[tokio::test]
async fn test_impots_title_cut_at_separator() {
    let server = MockServer::start().await;
    let page = r#"<html><head>
        <title>Taxe foncière | impots.gouv.fr</title>
        <meta property="og:title" content="La taxe foncière">
    </head><body><div class="content">
        <p>La taxe foncière est due par le propriétaire.</p>
    </div></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/particulier/taxe-fonciere"))
        .respond_with(html(page))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::Impots);
    let article = client
        .get_document(
            &format!("{}/particulier/taxe-fonciere", server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(article.title, "Taxe foncière");
    assert_eq!(article.description.as_deref(), Some("La taxe foncière"));
    assert_eq!(article.content, "La taxe foncière est due par le propriétaire.");
}

#[tokio::test]
async fn test_missing_title_gets_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(
            "<html><body><main><p>Contenu sans titre mais assez long.</p></main></body></html>",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let article = client
        .get_document(
            &format!("{}/particuliers/vosdroits/F1", server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(article.title, client.site().placeholder_title());
    assert!(!article.content.is_empty());
}

#[tokio::test]
async fn test_empty_page_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body><main><h1>Titre</h1></main></body></html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let result = client
        .get_document(
            &format!("{}/particuliers/vosdroits/F2", server.uri()),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(VosDroitsError::NoContent { .. })));
}

#[tokio::test]
async fn test_not_found_and_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particuliers/vosdroits/F404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/particuliers/vosdroits/F500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let cancel = CancellationToken::new();

    let missing = client
        .get_document(&format!("{}/particuliers/vosdroits/F404", server.uri()), &cancel)
        .await;
    assert!(matches!(missing, Err(VosDroitsError::NotFound { .. })));

    let broken = client
        .get_document(&format!("{}/particuliers/vosdroits/F500", server.uri()), &cancel)
        .await;
    assert!(matches!(broken, Err(VosDroitsError::Http { status: 500, .. })));
}

#[tokio::test]
async fn test_non_html_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::Impots);
    let result = client
        .get_document(
            &format!("{}/formulaire/2042.pdf", server.uri()),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(VosDroitsError::NoContent { .. })));
}

#[tokio::test]
async fn test_rejected_urls_issue_no_request() {
    let server = MockServer::start().await;
    let client = client_for(&server, SiteId::ServicePublic);
    let cancel = CancellationToken::new();

    let foreign = client
        .get_document("https://example.com/particuliers/vosdroits/F1342", &cancel)
        .await;
    assert!(matches!(foreign, Err(VosDroitsError::DomainMismatch { .. })));

    let malformed = client.get_document("ftp://[broken", &cancel).await;
    assert!(matches!(malformed, Err(VosDroitsError::UrlInvalid(_))));

    let blank = client.get_document("   ", &cancel).await;
    assert!(matches!(blank, Err(VosDroitsError::UrlInvalid(_))));

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_redirect_outside_site_is_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "https://example.com/elsewhere"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let result = client
        .get_document(
            &format!("{}/particuliers/vosdroits/F3", server.uri()),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(VosDroitsError::Fetch { .. })));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(ARTICLE_PAGE).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut config = test_config(10);
    config.client.request_timeout_secs = 1;
    let client = client_with(&server, SiteId::ServicePublic, config);
    let cancel = CancellationToken::new();

    let result = client
        .get_document(&format!("{}/particuliers/vosdroits/F1342", server.uri()), &cancel)
        .await;
    assert!(matches!(result, Err(VosDroitsError::Fetch { .. })));

    let categories = client.list_categories(&cancel).await.unwrap();
    assert_eq!(categories, client.site().default_categories);
}
