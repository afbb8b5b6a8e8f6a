use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query parameters for GET /summary/overview and GET /summary/comparison
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<i64>,
}

impl SummaryQuery {
    /// Lookback window in days. Default: 30, minimum: 1.
    pub fn window_days(&self) -> i64 {
        self.days.unwrap_or(30).max(1)
    }
}

/// One (provider, service) pair in the overview's cost ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopServiceEntry {
    pub provider: String,
    pub service: String,
    pub total_cost: f64,
}

/// Response structure for the overview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub time_window_days: i64,
    /// Keyed by provider; every supported provider is present, 0.0 when idle.
    pub total_cost_per_provider: BTreeMap<String, f64>,
    pub top_services: Vec<TopServiceEntry>,
}

/// One provider's row in the side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderComparison {
    pub provider: String,
    pub total_cost: f64,
    pub avg_cpu_utilization: Option<f64>,
    pub workload_count: i64,
}

/// JSON body for non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_days_defaults_to_thirty() {
        let query = SummaryQuery { days: None };
        assert_eq!(query.window_days(), 30);
    }

    #[test]
    fn test_window_days_clamps_zero_and_negatives_to_one() {
        assert_eq!(SummaryQuery { days: Some(0) }.window_days(), 1);
        assert_eq!(SummaryQuery { days: Some(-5) }.window_days(), 1);
    }

    #[test]
    fn test_window_days_passes_positive_values_through() {
        assert_eq!(SummaryQuery { days: Some(7) }.window_days(), 7);
    }

    #[test]
    fn test_serialize_overview_response() {
        let mut totals = BTreeMap::new();
        totals.insert("AWS".to_string(), 210.35);
        totals.insert("AZURE".to_string(), 0.0);
        totals.insert("GCP".to_string(), 95.5);

        let response = OverviewResponse {
            time_window_days: 30,
            total_cost_per_provider: totals,
            top_services: vec![TopServiceEntry {
                provider: "AWS".to_string(),
                service: "AmazonEC2".to_string(),
                total_cost: 210.35,
            }],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"time_window_days\":30"));
        assert!(json.contains("\"AZURE\":0.0"));
        assert!(json.contains("\"AmazonEC2\""));
    }

    #[test]
    fn test_serialize_comparison_null_cpu() {
        let row = ProviderComparison {
            provider: "GCP".to_string(),
            total_cost: 0.0,
            avg_cpu_utilization: None,
            workload_count: 0,
        };

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"avg_cpu_utilization\":null"));
        assert!(json.contains("\"workload_count\":0"));
    }
}
