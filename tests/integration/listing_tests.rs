use crate::common::{client_for, html, request_count};
use vosdroits::{CancellationToken, SiteId, VosDroitsError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NAVIGATION_PAGE: &str = r#"<html><body>
<nav class="fr-nav">
    <a class="fr-nav__link" href="/particuliers">Accueil</a>
    <a class="fr-nav__link" href="/particuliers/vosdroits/N19808" title="Logement social, location, achat">Logement</a>
    <a class="fr-nav__link" href="/particuliers/vosdroits/N19806">Travail</a>
    <a class="fr-nav__link" href="/particuliers/actualites">Actualités</a>
    <a class="fr-nav__link" href="/particuliers/vosdroits/N19806">Travail</a>
</nav>
</body></html>"#;

#[tokio::test]
async fn test_list_categories_from_navigation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particuliers"))
        .respond_with(html(NAVIGATION_PAGE))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let categories = client
        .list_categories(&CancellationToken::new())
        .await
        .unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Logement", "Travail"]);
    assert_eq!(categories[0].description, "Logement social, location, achat");
    assert_eq!(
        categories[1].url.as_deref(),
        Some(format!("{}/particuliers/vosdroits/N19806", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_list_categories_falls_back_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    for id in [SiteId::ServicePublic, SiteId::Impots] {
        let client = client_for(&server, id);
        let categories = client
            .list_categories(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(categories, client.site().default_categories);
        assert!(!categories.is_empty());
    }
}

#[tokio::test]
async fn test_list_categories_falls_back_when_page_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body><p>Maintenance</p></body></html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::Impots);
    let categories = client
        .list_categories(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(categories, client.site().default_categories);
}

#[tokio::test]
async fn test_list_life_events() {
    let server = MockServer::start().await;
    let page = r#"<html><body>
        <section id="comment-faire-si"><ul>
            <li><a href="/particuliers/vosdroits/F16225">J'attends un enfant</a></li>
            <li><a href="/particuliers/vosdroits/F17899">Je déménage</a></li>
        </ul></section>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/particuliers"))
        .respond_with(html(page))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let events = client
        .list_life_events(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].title, "Je déménage");
    assert_eq!(
        events[1].url,
        format!("{}/particuliers/vosdroits/F17899", server.uri())
    );
}

#[tokio::test]
async fn test_list_life_events_falls_back_on_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let events = client
        .list_life_events(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(events, client.site().default_life_events);
    assert!(events.iter().any(|e| e.title == "J'attends un enfant"));
}

#[tokio::test]
async fn test_life_event_detail_sections() {
    let server = MockServer::start().await;
    let page = r#"<html><body><main>
        <h1>J'attends un enfant</h1>
        <p class="fr-text--lead">Les démarches à effectuer avant la naissance.</p>
        <p>Un paragraphe d'introduction complémentaire.</p>
        <h2>Avant la naissance</h2>
        <p>Déclarer la grossesse à la CAF et à l'Assurance maladie.</p>
        <h2>Section vide</h2>
        <p>Court</p>
        <h2>Après la naissance</h2>
        <li>Déclarer la naissance en mairie sous 5 jours.</li>
    </main></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/particuliers/vosdroits/F16225"))
        .respond_with(html(page))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let detail = client
        .get_life_event_detail(
            &format!("{}/particuliers/vosdroits/F16225", server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(detail.title, "J'attends un enfant");
    assert_eq!(
        detail.introduction,
        "Les démarches à effectuer avant la naissance.\n\nUn paragraphe d'introduction complémentaire."
    );
    let titles: Vec<&str> = detail.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Avant la naissance", "Après la naissance"]);
    assert_eq!(
        detail.sections[1].content,
        "Déclarer la naissance en mairie sous 5 jours."
    );
}

#[tokio::test]
async fn test_life_event_detail_rejects_category_page() {
    let server = MockServer::start().await;
    let client = client_for(&server, SiteId::ServicePublic);

    let result = client
        .get_life_event_detail(
            &format!("{}/particuliers/vosdroits/N19808", server.uri()),
            &CancellationToken::new(),
        )
        .await;

    match result {
        Err(VosDroitsError::InvalidTarget { reason, .. }) => {
            assert!(reason.contains("category"));
        }
        other => panic!("expected InvalidTarget, got {other:?}"),
    }
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_life_event_detail_without_content_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body><main><h1>Je déménage</h1></main></body></html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let result = client
        .get_life_event_detail(
            &format!("{}/particuliers/vosdroits/F17899", server.uri()),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(VosDroitsError::NoContent { .. })));
}

#[tokio::test]
async fn test_cancelled_listing_is_not_replaced_by_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(NAVIGATION_PAGE))
        .mount(&server)
        .await;

    let client = client_for(&server, SiteId::ServicePublic);
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert!(matches!(
        client.list_categories(&cancel).await,
        Err(VosDroitsError::Cancelled)
    ));
    assert!(matches!(
        client.list_life_events(&cancel).await,
        Err(VosDroitsError::Cancelled)
    ));
    assert_eq!(request_count(&server).await, 0);
}
