//! Normalizes provider-native telemetry payloads into the unified schema.
//!
//! Per-record mapping is total: missing or malformed fields fall back to
//! documented defaults instead of failing the batch. The only error path is
//! an unrecognized provider key.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::TelemetryError;
use crate::models::provider::CloudProvider;
use crate::models::record::{CostRecord, PerformanceRecord};
use crate::providers::{aws, azure, gcp};

/// JSON number or numeric string, anything else collapses to 0.0.
fn safe_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Missing and null become the default; empty strings are kept as-is; other
/// scalars are rendered as their JSON text.
fn safe_str(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// RFC 3339 first (trailing `Z` included), then a naive datetime treated as
/// UTC, otherwise the current instant.
fn safe_timestamp(value: Option<&Value>) -> DateTime<Utc> {
    if let Some(raw) = value.and_then(Value::as_str) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.with_timezone(&Utc);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return naive.and_utc();
        }
    }
    Utc::now()
}

/// First candidate whose trimmed string form is non-empty, else "resource".
fn resource_hint(candidates: &[Option<&Value>]) -> String {
    for candidate in candidates {
        let text = match candidate {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Null) | None => continue,
            Some(other) => other.to_string(),
        };
        if !text.is_empty() {
            return text;
        }
    }
    "resource".to_string()
}

/// Routes a single metric value into exactly one of the three utilization
/// slots, returned as (cpu, memory, network). `cpu` wins before the other
/// token lists run, so names like "CPUUtilization" never match the "io"
/// substring hiding in "utilization".
fn metric_to_performance_fields(metric_name: &str, value: f64) -> (f64, f64, f64) {
    let metric = metric_name.to_lowercase();
    if metric.contains("cpu") {
        return (value, 0.0, 0.0);
    }
    if ["memory", "storage", "dtu", "slot"]
        .iter()
        .any(|token| metric.contains(token))
    {
        return (0.0, value, 0.0);
    }
    if ["latency", "network", "io", "throughput"]
        .iter()
        .any(|token| metric.contains(token))
    {
        return (0.0, 0.0, value);
    }
    (value, 0.0, 0.0)
}

fn normalize_aws_cost(provider: CloudProvider, record: &Value) -> CostRecord {
    CostRecord {
        provider,
        account_id: provider.default_account_identifier().to_string(),
        service: safe_str(record.get("service"), "AmazonService"),
        region: safe_str(record.get("region"), "global"),
        usage_amount: safe_float(record.get("usage_amount")).max(0.0),
        usage_unit: safe_str(record.get("usage_type"), "Units"),
        cost_amount: safe_float(record.get("cost")).max(0.0),
        currency: safe_str(record.get("currency"), "USD"),
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

fn normalize_azure_cost(provider: CloudProvider, record: &Value) -> CostRecord {
    CostRecord {
        provider,
        account_id: safe_str(
            record.get("resourceGroup"),
            provider.default_account_identifier(),
        ),
        service: safe_str(record.get("meterCategory"), "AzureService"),
        region: safe_str(record.get("meterRegion"), "global"),
        usage_amount: safe_float(record.get("quantity")).max(0.0),
        usage_unit: safe_str(record.get("unit"), "Units"),
        cost_amount: safe_float(record.get("cost")).max(0.0),
        currency: safe_str(record.get("currency"), "USD"),
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

fn normalize_gcp_cost(provider: CloudProvider, record: &Value) -> CostRecord {
    CostRecord {
        provider,
        account_id: safe_str(
            record.get("project"),
            provider.default_account_identifier(),
        ),
        service: safe_str(record.get("sku"), "GCPService"),
        region: safe_str(record.get("location"), "global"),
        usage_amount: safe_float(record.get("usage")).max(0.0),
        usage_unit: safe_str(record.get("usage_unit"), "Units"),
        cost_amount: safe_float(record.get("cost")).max(0.0),
        currency: safe_str(record.get("currency"), "USD"),
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

fn normalize_aws_performance(provider: CloudProvider, record: &Value) -> PerformanceRecord {
    let (cpu, memory, network) = metric_to_performance_fields(
        &safe_str(record.get("metric"), ""),
        safe_float(record.get("value")),
    );
    PerformanceRecord {
        provider,
        account_id: provider.default_account_identifier().to_string(),
        service: safe_str(record.get("service"), "AmazonService"),
        region: safe_str(record.get("region"), "global"),
        resource_id: resource_hint(&[
            record.get("instance_type"),
            record.get("bucket_class"),
            record.get("engine"),
            record.get("service"),
        ]),
        cpu_utilization: cpu,
        memory_utilization: memory,
        network_io: network,
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

fn normalize_azure_performance(provider: CloudProvider, record: &Value) -> PerformanceRecord {
    let (cpu, memory, network) = metric_to_performance_fields(
        &safe_str(record.get("metricName"), ""),
        safe_float(record.get("average")),
    );
    PerformanceRecord {
        provider,
        account_id: provider.default_account_identifier().to_string(),
        service: safe_str(record.get("resourceType"), "AzureResource"),
        region: safe_str(record.get("meterRegion"), "global"),
        resource_id: resource_hint(&[
            record.get("vmSize"),
            record.get("accountType"),
            record.get("tier"),
        ]),
        cpu_utilization: cpu,
        memory_utilization: memory,
        network_io: network,
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

fn normalize_gcp_performance(provider: CloudProvider, record: &Value) -> PerformanceRecord {
    let (cpu, memory, network) = metric_to_performance_fields(
        &safe_str(record.get("metric"), ""),
        safe_float(record.get("value")),
    );
    PerformanceRecord {
        provider,
        account_id: provider.default_account_identifier().to_string(),
        service: safe_str(record.get("service"), "GCPService"),
        region: safe_str(record.get("location"), "global"),
        resource_id: resource_hint(&[
            record.get("machine_type"),
            record.get("storage_class"),
            record.get("reservation"),
        ]),
        cpu_utilization: cpu,
        memory_utilization: memory,
        network_io: network,
        timestamp: safe_timestamp(record.get("timestamp")),
    }
}

/// Convert provider-shaped cost payloads into unified records.
pub fn normalize_cost_records(
    provider: &str,
    raw_records: &[Value],
) -> Result<Vec<CostRecord>, TelemetryError> {
    let provider: CloudProvider = provider.parse()?;
    let normalize = match provider {
        CloudProvider::Aws => normalize_aws_cost,
        CloudProvider::Azure => normalize_azure_cost,
        CloudProvider::Gcp => normalize_gcp_cost,
    };

    Ok(raw_records
        .iter()
        .map(|record| normalize(provider, record))
        .collect())
}

/// Convert provider-shaped telemetry payloads into unified records.
pub fn normalize_performance_records(
    provider: &str,
    raw_records: &[Value],
) -> Result<Vec<PerformanceRecord>, TelemetryError> {
    let provider: CloudProvider = provider.parse()?;
    let normalize = match provider {
        CloudProvider::Aws => normalize_aws_performance,
        CloudProvider::Azure => normalize_azure_performance,
        CloudProvider::Gcp => normalize_gcp_performance,
    };

    Ok(raw_records
        .iter()
        .map(|record| normalize(provider, record))
        .collect())
}

/// Pull the mock window from every provider and return the merged normalized
/// batch, providers in `CloudProvider::ALL` order.
pub fn fetch_and_normalize_all_providers(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(Vec<CostRecord>, Vec<PerformanceRecord>), TelemetryError> {
    let mut all_costs = Vec::new();
    let mut all_performance = Vec::new();

    for provider in CloudProvider::ALL {
        let (raw_costs, raw_performance) = match provider {
            CloudProvider::Aws => (
                aws::mock_cost_data(start_date, end_date)?,
                aws::mock_performance_data(start_date, end_date)?,
            ),
            CloudProvider::Azure => (
                azure::mock_cost_data(start_date, end_date)?,
                azure::mock_performance_data(start_date, end_date)?,
            ),
            CloudProvider::Gcp => (
                gcp::mock_cost_data(start_date, end_date)?,
                gcp::mock_performance_data(start_date, end_date)?,
            ),
        };

        all_costs.extend(normalize_cost_records(provider.as_str(), &raw_costs)?);
        all_performance.extend(normalize_performance_records(
            provider.as_str(),
            &raw_performance,
        )?);
    }

    Ok((all_costs, all_performance))
}
