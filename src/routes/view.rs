use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::RequestId, models::ViewSnapshot, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub term: String,
}

/// Handler for the view snapshot endpoint
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    let snapshot = state.controller.snapshot(state.input.live()).await;
    Json(snapshot)
}

/// Handler for search box updates
///
/// Only sets the live term; the fetch happens once the term has been stable
/// for the debounce period.
pub async fn set_search_term(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(input): Json<SearchInput>,
) -> StatusCode {
    tracing::debug!(
        request_id = %request_id,
        term = %input.term,
        "Search input updated"
    );

    state.input.set(input.term);
    StatusCode::ACCEPTED
}
