use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use songfinder_api::{init_tracing, router, AppState};
use songfinder_common::Config;
use songfinder_lyrics::LyricsFinder;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    config.log_redacted();

    let state = Arc::new(AppState {
        finder: LyricsFinder::from_config(&config),
    });

    let host = std::env::var("API_HOST").unwrap_or_else(|_| config.web_host.clone());
    let port = std::env::var("API_PORT").unwrap_or_else(|_| config.web_port.to_string());

    let app = router(state);

    let addr = format!("{host}:{port}");
    info!("Song search API starting on {addr}");
    info!("POST http://{addr}/api/song-search with {{\"query\": \"...\"}}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
