pub mod error;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use cinematch_core::{load_csv, BuildOptions, Index, IndexHandle, Recommendation, DEFAULT_K};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Largest `k` a client may ask for.
pub const MAX_K: usize = 50;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: PathBuf,
    pub build_options: BuildOptions,
    pub default_k: usize,
    pub admin_token: Option<String>,
}

impl AppConfig {
    pub fn new<P: Into<PathBuf>>(dataset: P) -> Self {
        Self {
            dataset: dataset.into(),
            build_options: BuildOptions::default(),
            default_k: DEFAULT_K,
            admin_token: std::env::var("ADMIN_TOKEN").ok(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexHandle>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, index: IndexHandle) -> Self {
        Self { index: Arc::new(index), config: Arc::new(config) }
    }
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub movie: Option<String>,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<String>,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub movies: usize,
    pub vocabulary: usize,
}

/// Load the dataset and build the first index, then assemble the router.
///
/// A failed initial build is logged and the service starts without an index;
/// `POST /index/reload` can install one later.
pub fn build_app(config: AppConfig) -> Result<Router> {
    let handle = match load_index(&config) {
        Ok(index) => {
            tracing::info!(movies = index.len(), "app initialized");
            IndexHandle::with_index(index)
        }
        Err(err) => {
            tracing::error!(error = %err, dataset = %config.dataset.display(), "failed to initialize index");
            IndexHandle::new()
        }
    };
    Ok(router(AppState::new(config, handle)))
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/movies", get(movies_handler))
        .route("/recommend", post(recommend_handler))
        .route("/index/reload", post(reload_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn movies_handler(State(state): State<AppState>) -> ApiResult<Json<MoviesResponse>> {
    let index = state.index.current()?;
    let movies = index.sorted_titles().into_iter().map(str::to_string).collect();
    Ok(Json(MoviesResponse { movies }))
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendResponse>> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected recommend body");
        ApiError::InvalidInput("Invalid request body".into())
    })?;
    let movie = req.movie.ok_or_else(|| ApiError::InvalidInput("Movie name is required".into()))?;
    let movie = movie.trim();
    if movie.is_empty() {
        return Err(ApiError::InvalidInput("Movie name cannot be empty".into()));
    }
    let k = req.k.unwrap_or(state.config.default_k);
    if !(1..=MAX_K).contains(&k) {
        return Err(ApiError::InvalidInput(format!("k must be between 1 and {MAX_K}")));
    }

    let recommendations = state.index.recommend(movie, k)?;
    tracing::debug!(title = movie, k, found = recommendations.len(), "recommendations served");
    Ok(Json(RecommendResponse { recommendations }))
}

/// Rebuild from the dataset on disk and swap the live index.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<ReloadResponse>> {
    authorize(&state, &headers)?;
    let config = state.config.clone();
    let index = tokio::task::spawn_blocking(move || load_index(&config))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let response = ReloadResponse { movies: index.len(), vocabulary: index.vocabulary().len() };
    state.index.replace(index);
    tracing::info!(movies = response.movies, vocabulary = response.vocabulary, "index reloaded");
    Ok(Json(response))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "Endpoint not found" })))
}

fn load_index(config: &AppConfig) -> ApiResult<Index> {
    let dataset = load_csv(&config.dataset)?;
    Ok(Index::build(&dataset.records, &config.build_options)?)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let required = match &state.config.admin_token {
        Some(t) => t,
        None => return Err(ApiError::Unauthorized("ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}
