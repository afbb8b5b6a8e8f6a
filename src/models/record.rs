use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::provider::CloudProvider;

/// One billing line item mapped into the unified schema. `account_id` is the
/// provider-native identifier, not a database key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub provider: CloudProvider,
    pub account_id: String,
    pub service: String,
    pub region: String,
    pub usage_amount: f64,
    pub usage_unit: String,
    pub cost_amount: f64,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
}

/// One utilization sample mapped into the unified schema. Classification
/// routes the sample's value into exactly one metric slot; the other two
/// carry 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub provider: CloudProvider,
    pub account_id: String,
    pub service: String,
    pub region: String,
    pub resource_id: String,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub network_io: f64,
    pub timestamp: DateTime<Utc>,
}
