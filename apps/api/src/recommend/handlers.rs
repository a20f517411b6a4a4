//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::skillpath::RecommendationResult;
use crate::recommend::recommender::{recommend, RecommendRequest};
use crate::state::AppState;

/// POST /api/recommend/submit
///
/// Runs one recommendation request. AI mode degrades to the keyword pipeline
/// on any provider failure; the response carries its actual `source`.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendationResult>, AppError> {
    let result = recommend(state.store.as_ref(), state.ai.as_ref(), request).await?;
    Ok(Json(result))
}
