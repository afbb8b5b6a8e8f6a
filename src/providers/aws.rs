//! Mock AWS cost and performance client.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use super::{normalize_range, stamp_in_window};
use crate::error::TelemetryError;

/// Representative AWS cost entries for EC2, S3 and RDS.
pub fn mock_cost_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(5),
        end - Duration::days(12),
        end - Duration::days(20),
    ];

    Ok(vec![
        json!({
            "service": "AmazonEC2",
            "region": "us-east-1",
            "usage_amount": 140.2,
            "usage_type": "BoxUsage:m5.large",
            "cost": 210.35,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "service": "AmazonS3",
            "region": "us-west-2",
            "usage_amount": 18_500,
            "usage_type": "TimedStorage-ByteHrs",
            "cost": 44.12,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "service": "AmazonRDS",
            "region": "eu-central-1",
            "usage_amount": 320,
            "usage_type": "InstanceUsage:db.r6g.large",
            "cost": 168.9,
            "currency": "USD",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}

/// Representative AWS performance metrics.
pub fn mock_performance_data(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<Value>, TelemetryError> {
    let (start, end) = normalize_range(start_date, end_date)?;
    let timestamps = [
        end - Duration::days(3),
        end - Duration::days(9),
        end - Duration::days(16),
    ];

    Ok(vec![
        json!({
            "service": "AmazonEC2",
            "region": "us-east-1",
            "metric": "CPUUtilization",
            "value": 67.3,
            "unit": "Percent",
            "instance_type": "m5.large",
            "timestamp": stamp_in_window(timestamps[0], start, end),
        }),
        json!({
            "service": "AmazonS3",
            "region": "us-west-2",
            "metric": "FirstByteLatency",
            "value": 35,
            "unit": "Milliseconds",
            "bucket_class": "STANDARD",
            "timestamp": stamp_in_window(timestamps[1], start, end),
        }),
        json!({
            "service": "AmazonRDS",
            "region": "eu-central-1",
            "metric": "FreeStorageSpace",
            "value": 85,
            "unit": "Percent",
            "engine": "aurora-postgresql",
            "timestamp": stamp_in_window(timestamps[2], start, end),
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_data_shape() {
        let end = Utc::now();
        let start = end - Duration::days(30);
        let records = mock_cost_data(start, end).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["service"], "AmazonEC2");
        assert_eq!(records[0]["cost"], 210.35);
        assert_eq!(records[2]["usage_type"], "InstanceUsage:db.r6g.large");
    }

    #[test]
    fn test_timestamps_stay_inside_the_window() {
        let end = Utc::now();
        let start = end - Duration::days(10);

        for record in mock_cost_data(start, end)
            .unwrap()
            .iter()
            .chain(mock_performance_data(start, end).unwrap().iter())
        {
            let raw = record["timestamp"].as_str().unwrap();
            let ts: DateTime<Utc> = raw.parse().unwrap();
            assert!(ts >= start && ts <= end, "timestamp {raw} escaped the window");
        }
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let end = Utc::now();
        let start = end + Duration::days(2);
        assert!(matches!(
            mock_cost_data(start, end),
            Err(TelemetryError::InvalidWindow { .. })
        ));
    }
}
