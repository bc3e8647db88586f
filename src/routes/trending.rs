use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::TrendingEntry,
    routes::AppState,
};

const MAX_TRENDING_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    limit: Option<usize>,
}

/// Handler for a live read of the most searched terms
pub async fn top_searches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQuery>,
) -> AppResult<Json<Vec<TrendingEntry>>> {
    let limit = params.limit.unwrap_or(state.trending_limit);
    if limit > MAX_TRENDING_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be at most {}",
            MAX_TRENDING_LIMIT
        )));
    }

    let records = state.recorder.trending(limit).await?;
    Ok(Json(TrendingEntry::ranked(&records)))
}
