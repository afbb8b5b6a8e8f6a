//! Summary Handlers
//!
//! GET /summary/overview and GET /summary/comparison endpoints for dashboard
//! views over the normalized telemetry.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use crate::models::summary::{ErrorResponse, OverviewResponse, ProviderComparison, SummaryQuery};
use crate::services::summary;
use crate::AppState;

/// GET /summary/overview
///
/// Per-provider cost totals plus the five most expensive (provider, service)
/// pairs within the lookback window.
///
/// # Query Parameters
///
/// - `days` - Lookback window in days (default: 30, minimum: 1)
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<OverviewResponse>, (StatusCode, Json<ErrorResponse>)> {
    let days = query.window_days();
    info!(days = days, "overview summary requested");

    let overview = summary::overview_summary(&state.db, days)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to build overview summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    info!(
        top_services = overview.top_services.len(),
        "overview summary returned"
    );
    Ok(Json(overview))
}

/// GET /summary/comparison
///
/// One row per provider: total cost, average CPU utilization and distinct
/// resource count within the lookback window.
///
/// # Query Parameters
///
/// - `days` - Lookback window in days (default: 30, minimum: 1)
pub async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<ProviderComparison>>, (StatusCode, Json<ErrorResponse>)> {
    let days = query.window_days();
    info!(days = days, "comparison summary requested");

    let comparison = summary::comparison_summary(&state.db, days)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to build comparison summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    Ok(Json(comparison))
}
