//! Mock provider adapters. Each submodule ships fixed synthetic datasets in
//! the vendor's native payload shape; the shared helpers clamp every request
//! to a 30-day lookback ending no later than now.

pub mod aws;
pub mod azure;
pub mod gcp;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::TelemetryError;

/// Clamp the requested range to the last 30 days ending no later than now.
/// An inverted range is the caller's mistake and is reported, not repaired.
pub fn normalize_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), TelemetryError> {
    if start > end {
        return Err(TelemetryError::InvalidWindow { start, end });
    }

    let now = Utc::now();
    let normalized_end = end.min(now);
    let normalized_start = start.max(normalized_end - Duration::days(30));
    Ok((normalized_start, normalized_end))
}

/// Saturate a record timestamp into the normalized window.
pub fn clamp_timestamp(
    ts: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    ts.max(start).min(end)
}

/// Clamp and render a timestamp the way the vendor payloads carry it.
pub(crate) fn stamp_in_window(
    ts: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> String {
    clamp_timestamp(ts, start, end).to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range_rejects_inverted_window() {
        let end = Utc::now();
        let start = end + Duration::days(1);
        let err = normalize_range(start, end).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidWindow { .. }));
    }

    #[test]
    fn test_normalize_range_clamps_future_end_to_now() {
        let start = Utc::now() - Duration::days(5);
        let end = Utc::now() + Duration::days(5);
        let (_, normalized_end) = normalize_range(start, end).unwrap();
        assert!(normalized_end <= Utc::now());
    }

    #[test]
    fn test_normalize_range_caps_lookback_at_thirty_days() {
        let end = Utc::now();
        let start = end - Duration::days(365);
        let (normalized_start, normalized_end) = normalize_range(start, end).unwrap();
        assert_eq!(normalized_end - normalized_start, Duration::days(30));
    }

    #[test]
    fn test_normalize_range_keeps_short_windows_untouched() {
        let end = Utc::now() - Duration::days(1);
        let start = end - Duration::days(7);
        let (normalized_start, normalized_end) = normalize_range(start, end).unwrap();
        assert_eq!(normalized_start, start);
        assert_eq!(normalized_end, end);
    }

    #[test]
    fn test_clamp_timestamp_saturates_both_ends() {
        let start = Utc::now() - Duration::days(10);
        let end = Utc::now();
        assert_eq!(clamp_timestamp(start - Duration::days(3), start, end), start);
        assert_eq!(clamp_timestamp(end + Duration::days(3), start, end), end);
        let inside = start + Duration::days(4);
        assert_eq!(clamp_timestamp(inside, start, end), inside);
    }
}
