use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};
use watchtonight_content::source::{MOVIES_DOCUMENT, SEASONS_DOCUMENT};
use watchtonight_content::{ContentView, StaticContentSource};
use watchtonight_core::structured::SiteInfo;
use watchtonight_core::transform::TransformOptions;
use watchtonight_server::routes::build_router;
use watchtonight_server::state::AppState;
use watchtonight_settings::MemoryBackend;

fn documents() -> StaticContentSource {
    StaticContentSource::new()
        .with_document(
            MOVIES_DOCUMENT,
            json!({
                "generated_at": "2024-01-01T00:00:00Z",
                "movies": [
                    {
                        "id": 693134,
                        "title": "Dune: Part Two",
                        "description": "Paul unites with the Fremen.",
                        "release_date": "2024-03-01",
                        "poster_path": "/dune2.jpg",
                        "streaming_availability": {
                            "US": {
                                "link": "https://www.themoviedb.org/movie/693134/watch",
                                "services": {
                                    "subscription": [{ "provider_id": 1899, "provider_name": "Max", "logo_path": "/max.jpg" }],
                                    "rent": [{ "provider_id": 2, "provider_name": "Apple TV", "logo_path": "/atv.jpg" }]
                                }
                            }
                        }
                    },
                    { "id": 11, "title": "Undated" }
                ]
            }),
        )
        .with_document(
            SEASONS_DOCUMENT,
            json!({
                "generated_at": "2024-03-05T00:00:00Z",
                "seasons": [
                    {
                        "series_id": 126308,
                        "series_name": "Shōgun",
                        "season_number": 1,
                        "air_date": "2024-02-27",
                        "ratings": { "imdb": { "rating": 8.6 } }
                    }
                ]
            }),
        )
}

/// Create a test server whose content load has already finished.
async fn test_app(source: StaticContentSource) -> TestServer {
    let content = ContentView::new();
    content
        .mount(Arc::new(source), TransformOptions::default())
        .await
        .unwrap()
        .await
        .unwrap();

    let state = AppState::new(content, Arc::new(MemoryBackend::new()), SiteInfo::default());
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_content_state() {
    let server = test_app(documents()).await;
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["content"], "ready");
}

#[tokio::test]
async fn content_feed_is_sorted_and_stamped() {
    let server = test_app(documents()).await;
    let resp = server.get("/api/v1/content").await;
    resp.assert_status_ok();
    let body: Value = resp.json();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["lastUpdated"], "2024-03-05T00:00:00Z");

    let items = body["items"].as_array().unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Dune: Part Two", "Shōgun — Season 1", "Undated"]);

    let dune = &items[0];
    assert_eq!(dune["kind"], "movie");
    assert_eq!(dune["posterUrl"], "https://image.tmdb.org/t/p/w500/dune2.jpg");
    assert_eq!(dune["rentalUrl"], "https://www.themoviedb.org/movie/693134/watch");
    assert_eq!(dune["streamingProviders"].as_array().unwrap().len(), 2);
    assert!(dune["addUrl"].is_null());

    assert_eq!(items[1]["imdbRating"], 8.6);
    assert_eq!(items[1]["infoUrl"], "https://www.themoviedb.org/tv/126308/season/1");
}

#[tokio::test]
async fn content_can_be_filtered_by_kind() {
    let server = test_app(documents()).await;
    let resp = server.get("/api/v1/content").add_query_param("kind", "tv").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "tv");
}

#[tokio::test]
async fn unknown_kind_is_a_bad_request() {
    let server = test_app(documents()).await;
    let resp = server.get("/api/v1/content").add_query_param("kind", "series").await;
    resp.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn failed_load_returns_single_message() {
    let source = StaticContentSource::new().with_document(MOVIES_DOCUMENT, json!({ "movies": [] }));
    let server = test_app(source).await;

    let resp = server.get("/api/v1/content").await;
    resp.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "content_unavailable");
    assert_eq!(body["error"]["message"], "Could not load content data.");
    assert!(body.get("items").is_none());
}

#[tokio::test]
async fn content_unavailable_before_load() {
    let state = AppState::new(
        ContentView::new(),
        Arc::new(MemoryBackend::new()),
        SiteInfo::default(),
    );
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server.get("/api/v1/content").await;
    resp.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "loading");
}

#[tokio::test]
async fn structured_data_lists_feed() {
    let server = test_app(documents()).await;
    let resp = server.get("/api/v1/content/structured-data").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["@graph"][1]["numberOfItems"], 3);
    assert_eq!(body["@graph"][1]["itemListElement"][1]["item"]["@type"], "TVSeason");
}

#[tokio::test]
async fn settings_roundtrip_and_deep_links() {
    let server = test_app(documents()).await;

    let resp = server.get("/api/v1/settings").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body, json!({ "radarrUrl": "", "sonarrUrl": "" }));

    let resp = server
        .put("/api/v1/settings")
        .json(&json!({ "radarrUrl": "https://radarr.local//", "sonarrUrl": "https://sonarr.local/" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["radarrUrl"], "https://radarr.local");
    assert_eq!(body["sonarrUrl"], "https://sonarr.local");

    let body: Value = server.get("/api/v1/content").await.json();
    assert_eq!(
        body["items"][0]["addUrl"],
        "https://radarr.local/add/new?term=tmdb%3A693134"
    );
    assert_eq!(
        body["items"][1]["addUrl"],
        "https://sonarr.local/add/new?term=Sh%C5%8Dgun"
    );
}

#[tokio::test]
async fn theme_defaults_dark_and_toggles() {
    let server = test_app(documents()).await;

    let body: Value = server.get("/api/v1/settings/theme").await.json();
    assert_eq!(body["theme"], "dark");

    let resp = server.post("/api/v1/settings/theme/toggle").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["theme"], "light");

    let body: Value = server.get("/api/v1/settings/theme").await.json();
    assert_eq!(body["theme"], "light");
}
