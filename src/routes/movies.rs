use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult, models::Movie, routes::AppState, services::providers::fetch_for_term,
};

#[derive(Debug, Deserialize)]
pub struct MovieSearchQuery {
    #[serde(default)]
    query: Option<String>,
}

/// Handler for direct movie lookups, bypassing the debounced view
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieSearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let term = params.query.unwrap_or_default();
    let movies = fetch_for_term(state.provider.as_ref(), &term).await?;
    Ok(Json(movies))
}
