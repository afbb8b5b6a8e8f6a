use serde::{Deserialize, Serialize};

/// Query parameters for GET /recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationQuery {
    pub days: Option<i64>,
    /// Minimum fractional savings before a move is suggested (0.15 = 15%).
    pub threshold: Option<f64>,
}

impl RecommendationQuery {
    /// Lookback window in days. Default: 30, minimum: 1.
    pub fn window_days(&self) -> i64 {
        self.days.unwrap_or(30).max(1)
    }

    /// Savings threshold with the service default of 0.15.
    pub fn savings_threshold(&self) -> f64 {
        self.threshold.unwrap_or(0.15)
    }
}

/// A single cross-provider move suggestion for one workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub workload_id: String,
    pub current_provider: String,
    pub recommended_provider: String,
    /// Percentage, rounded to two decimals (40.0 means "save 40%").
    pub estimated_savings_percent: f64,
    pub explanation: String,
}
