//! HTTP contract tests: drive the axum router with `oneshot` requests and
//! mock providers, assert on status codes, headers and payload shapes.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use songfinder_api::{router, AppState};
use songfinder_lyrics::testing::{lyrics_page, page_hit, MockLookup, MockSearcher, AMAZING_GRACE};
use songfinder_lyrics::{FinderSettings, LyricsFinder, LyricsLookup, PageSearcher, MAX_LYRICS_CHARS};

fn app(searcher: Option<Arc<MockSearcher>>, lookup: Arc<MockLookup>) -> Router {
    let finder = LyricsFinder::new(
        searcher.map(|s| s as Arc<dyn PageSearcher>),
        Some(lookup as Arc<dyn LyricsLookup>),
        FinderSettings::default(),
    );
    router(Arc::new(AppState { finder }))
}

fn search_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/song-search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn amazing_grace_searcher() -> Arc<MockSearcher> {
    Arc::new(MockSearcher::returning(vec![page_hit(
        "https://hymns.example.org/amazing-grace",
        "Amazing Grace - Lyrics | HymnSite",
        &lyrics_page(AMAZING_GRACE),
    )]))
}

#[tokio::test]
async fn success_payload_has_query_and_results() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));

    let resp = app.oneshot(search_request(r#"{"query": "Amazing Grace"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");
    let json = body_json(resp).await;
    assert_eq!(json["query"], "Amazing Grace");
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Amazing Grace");
    assert_eq!(results[0]["source"], "hymns.example.org");
    assert_eq!(results[0]["url"], "https://hymns.example.org/amazing-grace");
    let lyrics = results[0]["lyrics"].as_str().unwrap();
    assert!(lyrics.chars().count() <= MAX_LYRICS_CHARS);
}

#[tokio::test]
async fn success_echoes_the_normalized_query() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));

    let resp = app
        .oneshot(search_request(r#"{"query": "  Amazing   Grace "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["query"], "Amazing Grace");
}

#[tokio::test]
async fn not_found_is_404_with_category() {
    let app = app(Some(Arc::new(MockSearcher::empty())), Arc::new(MockLookup::miss()));

    let resp = app
        .oneshot(search_request(r#"{"query": "Obscure Unknown Hymn XYZ"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["category"], "no_hits_found");
    assert!(json["error"].is_string());
    assert!(json["details"].as_str().unwrap().contains("Obscure Unknown Hymn XYZ"));
    assert!(json.get("results").is_none());
}

#[tokio::test]
async fn empty_query_is_400_without_provider_calls() {
    let searcher = Arc::new(MockSearcher::empty());
    let lookup = Arc::new(MockLookup::miss());
    let app = app(Some(searcher.clone()), lookup.clone());

    let resp = app.oneshot(search_request(r#"{"query": ""}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["category"], "invalid_request");
    assert_eq!(searcher.calls(), 0);
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app(Some(Arc::new(MockSearcher::empty())), Arc::new(MockLookup::miss()));

    let resp = app.oneshot(search_request("{not json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_method_is_400() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/song-search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["category"], "invalid_request");
}

#[tokio::test]
async fn unconfigured_provider_is_503() {
    let app = app(None, Arc::new(MockLookup::returning(AMAZING_GRACE)));

    let resp = app.oneshot(search_request(r#"{"query": "Amazing Grace"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await["category"], "provider_unavailable");
}

#[tokio::test]
async fn cors_preflight_gets_empty_permissive_response() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/song-search")
                .header(header::ORIGIN, "https://portal.example.org")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type, authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(body_text(resp).await.is_empty());
}

#[tokio::test]
async fn cross_origin_post_carries_allow_origin() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));
    let mut req = search_request(r#"{"query": "Amazing Grace"}"#);
    req.headers_mut()
        .insert(header::ORIGIN, "https://portal.example.org".parse().unwrap());

    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn markdown_accept_header_renders_markdown() {
    let app = app(Some(amazing_grace_searcher()), Arc::new(MockLookup::miss()));
    let mut req = search_request(r#"{"query": "Amazing Grace"}"#);
    req.headers_mut()
        .insert(header::ACCEPT, "text/markdown".parse().unwrap());

    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
    let text = body_text(resp).await;
    assert!(text.starts_with("# Lyrics search: Amazing Grace"));
    assert!(text.contains("### [Amazing Grace](https://hymns.example.org/amazing-grace)"));
}

#[tokio::test]
async fn health_check_is_ok() {
    let app = app(None, Arc::new(MockLookup::miss()));

    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}
