//! Cross-provider placement suggestions over normalized telemetry.
//!
//! Workloads are aggregated per (provider, account, service, region), grouped
//! across providers by case-folded (service, region), and compared pairwise.
//! The selection itself is a pure function so the scenarios are testable
//! without a database.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::entities::prelude::{CloudAccounts, CostRecords, PerformanceRecords};
use crate::entities::{cloud_accounts, cost_records, performance_records};
use crate::models::recommendation::Recommendation;
use crate::models::workload::Workload;

use super::summary::window_start;

/// A workload's candidate substitutes must sit within this many absolute CPU
/// percentage points to count as "similar load".
const CPU_TOLERANCE: f64 = 10.0;

/// Aggregate cost and average CPU per (provider, account, service, region)
/// over the window. A workload may exist on one side only: cost-only
/// workloads have no CPU average, performance-only workloads carry zero cost.
/// The result is sorted by (provider, account_identifier, service, region) so
/// downstream selection is deterministic.
pub async fn collect_workloads(
    db: &DatabaseConnection,
    window_start: DateTime<Utc>,
) -> Result<Vec<Workload>, DbErr> {
    let mut workload_map: BTreeMap<(String, i32, String, String), Workload> = BTreeMap::new();

    let cost_rows: Vec<(String, i32, String, String, Option<f64>)> = CostRecords::find()
        .select_only()
        .column(cost_records::Column::Provider)
        .column(cost_records::Column::AccountId)
        .column(cost_records::Column::Service)
        .column(cost_records::Column::Region)
        .column_as(cost_records::Column::CostAmount.sum(), "total_cost")
        .filter(cost_records::Column::Timestamp.gte(window_start))
        .group_by(cost_records::Column::Provider)
        .group_by(cost_records::Column::AccountId)
        .group_by(cost_records::Column::Service)
        .group_by(cost_records::Column::Region)
        .into_tuple()
        .all(db)
        .await?;

    for (provider, account_id, service, region, total_cost) in cost_rows {
        let key = (
            provider.clone(),
            account_id,
            service.clone(),
            region.clone(),
        );
        workload_map.insert(
            key,
            Workload {
                provider,
                account_id,
                account_identifier: String::new(),
                service,
                region,
                total_cost: total_cost.unwrap_or(0.0),
                avg_cpu: None,
            },
        );
    }

    let avg_cpu: SimpleExpr =
        Func::avg(Expr::col(performance_records::Column::CpuUtilization)).into();
    let perf_rows: Vec<(String, i32, String, String, Option<f64>)> = PerformanceRecords::find()
        .select_only()
        .column(performance_records::Column::Provider)
        .column(performance_records::Column::AccountId)
        .column(performance_records::Column::Service)
        .column(performance_records::Column::Region)
        .column_as(avg_cpu, "avg_cpu")
        .filter(performance_records::Column::Timestamp.gte(window_start))
        .group_by(performance_records::Column::Provider)
        .group_by(performance_records::Column::AccountId)
        .group_by(performance_records::Column::Service)
        .group_by(performance_records::Column::Region)
        .into_tuple()
        .all(db)
        .await?;

    for (provider, account_id, service, region, avg) in perf_rows {
        let key = (
            provider.clone(),
            account_id,
            service.clone(),
            region.clone(),
        );
        let workload = workload_map.entry(key).or_insert_with(|| Workload {
            provider,
            account_id,
            account_identifier: String::new(),
            service,
            region,
            total_cost: 0.0,
            avg_cpu: None,
        });
        workload.avg_cpu = Some(avg.unwrap_or(0.0));
    }

    // resolve row ids to the human-facing identifier, falling back to the id
    let accounts: BTreeMap<i32, String> = CloudAccounts::find()
        .select_only()
        .column(cloud_accounts::Column::Id)
        .column(cloud_accounts::Column::AccountIdentifier)
        .into_tuple()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut workloads: Vec<Workload> = workload_map
        .into_values()
        .map(|mut workload| {
            workload.account_identifier = accounts
                .get(&workload.account_id)
                .cloned()
                .unwrap_or_else(|| workload.account_id.to_string());
            workload
        })
        .collect();

    workloads.sort_by(|a, b| {
        (&a.provider, &a.account_identifier, &a.service, &a.region).cmp(&(
            &b.provider,
            &b.account_identifier,
            &b.service,
            &b.region,
        ))
    });

    Ok(workloads)
}

/// Pure selection pass: for every workload with positive cost and a known CPU
/// average, pick the cheapest same-group substitute within the CPU tolerance
/// that clears the savings threshold. Ties keep the first candidate found.
pub fn suggest_for_workloads(
    workloads: &[Workload],
    savings_threshold: f64,
) -> Vec<Recommendation> {
    let mut groups: BTreeMap<(String, String), Vec<&Workload>> = BTreeMap::new();
    for workload in workloads {
        groups
            .entry(workload.group_key())
            .or_default()
            .push(workload);
    }

    let mut suggestions = Vec::new();
    for entries in groups.values() {
        if entries.len() < 2 {
            continue;
        }

        for (i, current) in entries.iter().enumerate() {
            let current_cpu = match current.avg_cpu {
                Some(cpu) if current.total_cost > 0.0 => cpu,
                _ => continue,
            };

            let mut best: Option<&Workload> = None;
            let mut best_savings = 0.0;
            for (j, candidate) in entries.iter().enumerate() {
                if i == j {
                    continue;
                }
                let candidate_cpu = match candidate.avg_cpu {
                    Some(cpu) if candidate.total_cost > 0.0 => cpu,
                    _ => continue,
                };
                if (candidate_cpu - current_cpu).abs() > CPU_TOLERANCE {
                    continue;
                }

                let savings = (current.total_cost - candidate.total_cost) / current.total_cost;
                if savings >= savings_threshold
                    && best.map_or(true, |b| candidate.total_cost < b.total_cost)
                {
                    best = Some(candidate);
                    best_savings = savings;
                }
            }

            if let Some(alternative) = best {
                let percent = (best_savings * 100.0 * 100.0).round() / 100.0;
                suggestions.push(Recommendation {
                    workload_id: current.workload_id(),
                    current_provider: current.provider.clone(),
                    recommended_provider: alternative.provider.clone(),
                    estimated_savings_percent: percent,
                    explanation: format!(
                        "Move {} in {} from {} (~{:.1}% CPU, cost {:.2}) to {} (~{:.1}% CPU, cost {:.2}) to save ~{:.2}%.",
                        current.service,
                        current.region,
                        current.provider,
                        current_cpu,
                        current.total_cost,
                        alternative.provider,
                        alternative.avg_cpu.unwrap_or(0.0),
                        alternative.total_cost,
                        percent
                    ),
                });
            }
        }
    }

    suggestions
}

/// Suggest cross-provider placements that cut cost at comparable CPU load.
pub async fn optimization_suggestions(
    db: &DatabaseConnection,
    time_window_days: i64,
    savings_threshold: f64,
) -> Result<Vec<Recommendation>, DbErr> {
    let start = window_start(time_window_days);
    let workloads = collect_workloads(db, start).await?;
    if workloads.is_empty() {
        return Ok(Vec::new());
    }

    let suggestions = suggest_for_workloads(&workloads, savings_threshold);
    tracing::debug!(
        "generated {} recommendations from {} workloads",
        suggestions.len(),
        workloads.len()
    );
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workload(
        provider: &str,
        account: &str,
        service: &str,
        region: &str,
        cost: f64,
        cpu: Option<f64>,
    ) -> Workload {
        Workload {
            provider: provider.to_string(),
            account_id: 1,
            account_identifier: account.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            total_cost: cost,
            avg_cpu: cpu,
        }
    }

    #[test]
    fn test_cheaper_substitute_with_similar_cpu_is_recommended() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 120.0, Some(63.5)),
        ];

        let recs = suggest_for_workloads(&workloads, 0.15);
        assert_eq!(recs.len(), 1);

        let rec = &recs[0];
        assert_eq!(rec.workload_id, "aws-account:Compute@us-east-1");
        assert_eq!(rec.current_provider, "AWS");
        assert_eq!(rec.recommended_provider, "GCP");
        assert_eq!(rec.estimated_savings_percent, 40.0);
        assert!(rec.explanation.contains("Move Compute in us-east-1 from AWS"));
        assert!(rec.explanation.contains("to save ~40.00%."));
    }

    #[test]
    fn test_cpu_gap_above_tolerance_blocks_the_move() {
        // huge savings, but the CPU profiles are not comparable
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 40.0, Some(50.0)),
        ];
        assert!(suggest_for_workloads(&workloads, 0.15).is_empty());
    }

    #[test]
    fn test_cpu_gap_of_exactly_ten_points_is_allowed() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 120.0, Some(55.0)),
        ];
        assert_eq!(suggest_for_workloads(&workloads, 0.15).len(), 1);
    }

    #[test]
    fn test_lone_workload_yields_nothing() {
        let workloads = vec![workload(
            "AWS",
            "aws-account",
            "Compute",
            "us-east-1",
            200.0,
            Some(65.0),
        )];
        assert!(suggest_for_workloads(&workloads, 0.15).is_empty());
    }

    #[test]
    fn test_savings_below_threshold_are_ignored() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 180.0, Some(64.0)),
        ];
        assert!(suggest_for_workloads(&workloads, 0.15).is_empty());
    }

    #[test]
    fn test_zero_cost_and_unknown_cpu_sides_are_excluded() {
        let no_cpu = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 120.0, None),
        ];
        assert!(suggest_for_workloads(&no_cpu, 0.15).is_empty());

        let free_candidate = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("AZURE", "rg-core", "Compute", "us-east-1", 0.0, Some(64.0)),
        ];
        assert!(suggest_for_workloads(&free_candidate, 0.15).is_empty());
    }

    #[test]
    fn test_lowest_cost_substitute_wins() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 300.0, Some(60.0)),
            workload("AZURE", "rg-core", "Compute", "us-east-1", 150.0, Some(62.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 100.0, Some(58.0)),
        ];

        let recs = suggest_for_workloads(&workloads, 0.15);
        let aws_rec = recs
            .iter()
            .find(|r| r.current_provider == "AWS")
            .expect("AWS should get a recommendation");
        assert_eq!(aws_rec.recommended_provider, "GCP");
    }

    #[test]
    fn test_equal_cost_ties_keep_the_first_candidate() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 300.0, Some(60.0)),
            workload("AZURE", "rg-core", "Compute", "us-east-1", 150.0, Some(62.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 150.0, Some(58.0)),
        ];

        let recs = suggest_for_workloads(&workloads, 0.15);
        let aws_rec = recs
            .iter()
            .find(|r| r.current_provider == "AWS")
            .expect("AWS should get a recommendation");
        assert_eq!(aws_rec.recommended_provider, "AZURE");
    }

    #[test]
    fn test_grouping_is_case_insensitive() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "US-East-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "compute", "us-east-1", 120.0, Some(63.5)),
        ];
        assert_eq!(suggest_for_workloads(&workloads, 0.15).len(), 1);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let workloads = vec![
            workload("AWS", "aws-account", "Storage", "us-east-1", 90.0, Some(40.0)),
            workload("GCP", "gcp-account", "Storage", "us-east-1", 50.0, Some(42.0)),
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 120.0, Some(63.5)),
        ];

        let first = suggest_for_workloads(&workloads, 0.15);
        let second = suggest_for_workloads(&workloads, 0.15);
        assert_eq!(first, second);

        // groups emit in case-folded (service, region) order
        assert_eq!(first.len(), 2);
        assert!(first[0].workload_id.contains("Compute"));
        assert!(first[1].workload_id.contains("Storage"));
    }

    #[test]
    fn test_higher_threshold_filters_more() {
        let workloads = vec![
            workload("AWS", "aws-account", "Compute", "us-east-1", 200.0, Some(65.0)),
            workload("GCP", "gcp-account", "Compute", "us-east-1", 120.0, Some(63.5)),
        ];
        assert_eq!(suggest_for_workloads(&workloads, 0.15).len(), 1);
        assert!(suggest_for_workloads(&workloads, 0.5).is_empty());
    }
}
