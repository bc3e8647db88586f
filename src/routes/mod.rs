use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{analytics::AnalyticsRecorder, providers::MovieProvider},
    view::{Debouncer, ViewController},
};

pub mod movies;
pub mod trending;
pub mod view;

/// Shared handles the HTTP surface works with
pub struct AppState {
    pub controller: ViewController,
    pub input: Arc<Debouncer>,
    pub recorder: AnalyticsRecorder,
    pub provider: Arc<dyn MovieProvider>,
    pub trending_limit: usize,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/view", get(view::get_view))
        .route("/search", put(view::set_search_term))
        .route("/movies", get(movies::search))
        .route("/trending", get(trending::top_searches))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
