use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use watchtonight_content::{ContentView, HttpContentSource};
use watchtonight_core::transform::TransformOptions;
use watchtonight_server::config::ServerConfig;
use watchtonight_server::state::AppState;
use watchtonight_settings::SqliteBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();
    info!(db_path = %config.db_path, "opening settings database");

    let settings = SqliteBackend::open(&config.db_path)
        .await
        .context("failed to open settings database")?;

    // Content is loaded once per process, like once per page load.
    let content = ContentView::new();
    let source = Arc::new(HttpContentSource::new(config.content_url.clone()));
    info!(content_url = %config.content_url, region = %config.region, "loading content");
    content
        .mount(
            source,
            TransformOptions {
                region: config.region.clone(),
            },
        )
        .await;

    let app_state = AppState::new(content.clone(), Arc::new(settings), config.site_info());
    let app = watchtonight_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    content.teardown();
    Ok(())
}
