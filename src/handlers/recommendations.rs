//! Recommendations Handler
//!
//! GET /recommendations endpoint for cross-provider placement suggestions.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use crate::models::recommendation::{Recommendation, RecommendationQuery};
use crate::models::summary::ErrorResponse;
use crate::services::optimization;
use crate::AppState;

/// GET /recommendations
///
/// Suggests moving workloads to a cheaper provider running at similar CPU
/// load within the lookback window.
///
/// # Query Parameters
///
/// - `days` - Lookback window in days (default: 30, minimum: 1)
/// - `threshold` - Minimum fractional savings before a move is suggested
///   (default: 0.15)
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<Recommendation>>, (StatusCode, Json<ErrorResponse>)> {
    let days = query.window_days();
    let threshold = query.savings_threshold();
    info!(days = days, threshold = threshold, "recommendations requested");

    let recommendations = optimization::optimization_suggestions(&state.db, days, threshold)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to generate recommendations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    info!(count = recommendations.len(), "recommendations returned");
    Ok(Json(recommendations))
}
