//! Read-side summaries over normalized cost and performance records.
//!
//! Aggregation is pushed into SQL; handlers only shape the rows into
//! responses. Every summary zero-fills the full provider set so dashboards
//! never have to guess at missing keys.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::prelude::{CostRecords, PerformanceRecords};
use crate::entities::{cost_records, performance_records};
use crate::models::provider::CloudProvider;
use crate::models::summary::{OverviewResponse, ProviderComparison, TopServiceEntry};

/// UTC start of the requested lookback window; never less than one day.
pub(crate) fn window_start(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days.max(1))
}

async fn cost_totals_by_provider(
    db: &DatabaseConnection,
    window_start: DateTime<Utc>,
) -> Result<Vec<(String, Option<f64>)>, DbErr> {
    CostRecords::find()
        .select_only()
        .column(cost_records::Column::Provider)
        .column_as(cost_records::Column::CostAmount.sum(), "total_cost")
        .filter(cost_records::Column::Timestamp.gte(window_start))
        .group_by(cost_records::Column::Provider)
        .into_tuple()
        .all(db)
        .await
}

/// High-level cost insight for dashboard overviews: per-provider totals plus
/// the five most expensive (provider, service) pairs in the window.
pub async fn overview_summary(
    db: &DatabaseConnection,
    time_window_days: i64,
) -> Result<OverviewResponse, DbErr> {
    let days = time_window_days.max(1);
    let start = window_start(days);

    let mut total_cost_per_provider: BTreeMap<String, f64> = CloudProvider::ALL
        .iter()
        .map(|provider| (provider.as_str().to_string(), 0.0))
        .collect();
    for (provider, total) in cost_totals_by_provider(db, start).await? {
        total_cost_per_provider.insert(provider, total.unwrap_or(0.0));
    }

    let top_rows: Vec<(String, String, Option<f64>)> = CostRecords::find()
        .select_only()
        .column(cost_records::Column::Provider)
        .column(cost_records::Column::Service)
        .column_as(cost_records::Column::CostAmount.sum(), "total_cost")
        .filter(cost_records::Column::Timestamp.gte(start))
        .group_by(cost_records::Column::Provider)
        .group_by(cost_records::Column::Service)
        .order_by_desc(cost_records::Column::CostAmount.sum())
        .order_by_asc(cost_records::Column::Provider)
        .order_by_asc(cost_records::Column::Service)
        .limit(5)
        .into_tuple()
        .all(db)
        .await?;

    let top_services = top_rows
        .into_iter()
        .map(|(provider, service, total_cost)| TopServiceEntry {
            provider,
            service,
            total_cost: total_cost.unwrap_or(0.0),
        })
        .collect();

    Ok(OverviewResponse {
        time_window_days: days,
        total_cost_per_provider,
        top_services,
    })
}

/// Per-provider metrics for comparative tables: total cost, average CPU over
/// performance rows and a distinct-resource workload count. Providers with no
/// rows in the window keep their zero-filled entry.
pub async fn comparison_summary(
    db: &DatabaseConnection,
    time_window_days: i64,
) -> Result<Vec<ProviderComparison>, DbErr> {
    let start = window_start(time_window_days);

    let mut comparison: Vec<ProviderComparison> = CloudProvider::ALL
        .iter()
        .map(|provider| ProviderComparison {
            provider: provider.as_str().to_string(),
            total_cost: 0.0,
            avg_cpu_utilization: None,
            workload_count: 0,
        })
        .collect();

    for (provider, total) in cost_totals_by_provider(db, start).await? {
        if let Some(entry) = comparison.iter_mut().find(|e| e.provider == provider) {
            entry.total_cost = total.unwrap_or(0.0);
        }
    }

    // ColumnTrait has no avg/count-distinct helpers, so build the expressions
    let avg_cpu: SimpleExpr =
        Func::avg(Expr::col(performance_records::Column::CpuUtilization)).into();
    let distinct_resources: SimpleExpr =
        Func::count_distinct(Expr::col(performance_records::Column::ResourceId)).into();
    let perf_rows: Vec<(String, Option<f64>, i64)> = PerformanceRecords::find()
        .select_only()
        .column(performance_records::Column::Provider)
        .column_as(avg_cpu, "avg_cpu")
        .column_as(distinct_resources, "workload_count")
        .filter(performance_records::Column::Timestamp.gte(start))
        .group_by(performance_records::Column::Provider)
        .into_tuple()
        .all(db)
        .await?;

    for (provider, avg, workload_count) in perf_rows {
        if let Some(entry) = comparison.iter_mut().find(|e| e.provider == provider) {
            entry.avg_cpu_utilization = avg;
            entry.workload_count = workload_count;
        }
    }

    Ok(comparison)
}
