pub mod markdown;
pub mod rest;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use songfinder_common::{ErrorResponse, SearchError};
use songfinder_lyrics::LyricsFinder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

pub struct AppState {
    pub finder: LyricsFinder,
}

/// Build the HTTP router. Shared by the server binary and the HTTP tests.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Song search (method checks happen in the handler so wrong methods get
        // the JSON error shape)
        .route("/api/song-search", any(rest::api_song_search))
        .with_state(state)
        // Panics become a generic 500 instead of a dropped connection
        .layer(CatchPanicLayer::custom(panic_response))
        // CORS: the portal UI calls this from another origin
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Search results are per-request; never cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency, tagged with a request id
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %uuid::Uuid::new_v4(),
                    )
                },
            ),
        )
}

fn panic_response(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let err = SearchError::Unexpected(anyhow::anyhow!("handler panicked"));
    tracing::error!(error = %err, "Unexpected fault while handling request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::from(&err)),
    )
        .into_response()
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("songfinder=info,firecrawl_client=info,lrclib_client=info,tower_http=info")
    });
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
