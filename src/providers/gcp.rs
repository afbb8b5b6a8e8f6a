//! Mock GCP cost and performance client.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use super::{normalize_range, stamp_in_window};
use crate::error::TelemetryError;

/// Representative GCP cost data for Compute, Storage and BigQuery.
pub fn mock_cost_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(6),
        end - Duration::days(14),
        end - Duration::days(25),
    ];

    Ok(vec![
        json!({
            "sku": "Compute Engine N2",
            "location": "us-central1",
            "usage": 110,
            "usage_unit": "Hours",
            "cost": 198.75,
            "currency": "USD",
            "project": "prod-core",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "sku": "Cloud Storage Standard",
            "location": "asia-southeast1",
            "usage": 7_400,
            "usage_unit": "GB-Month",
            "cost": 32.1,
            "currency": "USD",
            "project": "analytics-etl",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "sku": "BigQuery Slots",
            "location": "europe-west4",
            "usage": 56,
            "usage_unit": "SlotHours",
            "cost": 142.3,
            "currency": "USD",
            "project": "finance-warehouse",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}

/// Representative GCP performance data.
pub fn mock_performance_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(1),
        end - Duration::days(7),
        end - Duration::days(19),
    ];

    Ok(vec![
        json!({
            "service": "Compute Engine",
            "location": "us-central1",
            "metric": "CPU utilization",
            "value": 64.1,
            "unit": "Percent",
            "machine_type": "n2-standard-4",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "service": "Cloud Storage",
            "location": "asia-southeast1",
            "metric": "Request latency",
            "value": 28,
            "unit": "Milliseconds",
            "storage_class": "STANDARD",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "service": "BigQuery",
            "location": "europe-west4",
            "metric": "Slot utilization",
            "value": 71.4,
            "unit": "Percent",
            "reservation": "prod-bi-slots",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}
