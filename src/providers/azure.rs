//! Mock Azure cost and performance client.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use super::{normalize_range, stamp_in_window};
use crate::error::TelemetryError;

/// Representative Azure cost data for compute, storage and SQL.
pub fn mock_cost_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(4),
        end - Duration::days(11),
        end - Duration::days(23),
    ];

    Ok(vec![
        json!({
            "meterCategory": "Virtual Machines",
            "meterRegion": "eastus",
            "resourceGroup": "rg-prod-core",
            "quantity": 96,
            "unit": "Hours",
            "cost": 184.6,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "meterCategory": "Storage",
            "meterRegion": "westeurope",
            "resourceGroup": "rg-analytics",
            "quantity": 9_200,
            "unit": "GB-Month",
            "cost": 37.8,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "meterCategory": "Azure SQL Database",
            "meterRegion": "centralus",
            "resourceGroup": "rg-finance",
            "quantity": 210,
            "unit": "DTU Hours",
            "cost": 152.4,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}

/// Representative Azure performance data.
pub fn mock_performance_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(2),
        end - Duration::days(8),
        end - Duration::days(15),
    ];

    Ok(vec![
        json!({
            "resourceType": "VirtualMachine",
            "meterRegion": "eastus",
            "metricName": "Percentage CPU",
            "average": 61.5,
            "unit": "Percent",
            "vmSize": "Standard_D4s_v5",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "resourceType": "StorageAccount",
            "meterRegion": "westeurope",
            "metricName": "E2E Latency",
            "average": 23,
            "unit": "Milliseconds",
            "accountType": "Standard_LRS",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "resourceType": "AzureSQL",
            "meterRegion": "centralus",
            "metricName": "DTU Percentage",
            "average": 72.9,
            "unit": "Percent",
            "tier": "BusinessCritical",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}
