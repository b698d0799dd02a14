use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use watchtonight_content::{ContentFeed, LoadState};
use watchtonight_core::error::ApiError;
use watchtonight_core::structured::structured_data;
use watchtonight_core::{ContentKind, NormalizedRecord};
use watchtonight_settings::{ArrUrls, Theme};

use crate::error::AppError;
use crate::links::add_url;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/content", get(get_content))
        .route("/content/structured-data", get(get_structured_data))
        .route("/settings", get(get_settings).put(put_settings))
        .route("/settings/theme", get(get_theme))
        .route("/settings/theme/toggle", post(toggle_theme))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    content: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        content: state.content.state().await.as_str(),
    })
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Ready feed or the error the page should show instead.
async fn ready_feed(state: &AppState) -> Result<ContentFeed, AppError> {
    match state.content.state().await {
        LoadState::Ready(feed) => Ok(feed),
        LoadState::Failed(message) => Err(ApiError::Upstream(message).into()),
        LoadState::Idle | LoadState::Loading => {
            Err(ApiError::Unavailable("content is still loading".into()).into())
        }
    }
}

#[derive(Deserialize)]
struct ContentQuery {
    kind: Option<ContentKind>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedItem {
    #[serde(flatten)]
    record: NormalizedRecord,
    add_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentResponse {
    status: &'static str,
    items: Vec<FeedItem>,
    last_updated: String,
}

async fn get_content(
    State(state): State<AppState>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<ContentResponse>, AppError> {
    let Query(query) = query?;
    let feed = ready_feed(&state).await?;
    let urls = state.settings.arr_urls().await?;

    let items = feed
        .items
        .into_iter()
        .filter(|record| query.kind.is_none_or(|kind| record.kind == kind))
        .map(|record| FeedItem {
            add_url: add_url(&record, &urls),
            record,
        })
        .collect();

    Ok(Json(ContentResponse {
        status: "ready",
        items,
        last_updated: feed.last_updated,
    }))
}

async fn get_structured_data(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let feed = ready_feed(&state).await?;
    Ok(Json(structured_data(&feed.items, &state.site)))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

async fn get_settings(State(state): State<AppState>) -> Result<Json<ArrUrls>, AppError> {
    Ok(Json(state.settings.arr_urls().await?))
}

async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<ArrUrls>,
) -> Result<Json<ArrUrls>, AppError> {
    Ok(Json(state.settings.save_arr_urls(&body).await?))
}

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
}

async fn get_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(ThemeResponse {
        theme: state.settings.theme().await?,
    }))
}

async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(ThemeResponse {
        theme: state.settings.toggle_theme().await?,
    }))
}
