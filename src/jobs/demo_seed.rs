//! Idempotent demo-data seeding.
//!
//! One run replaces the requested window: purge both record tables for the
//! window, ensure an account row per (provider, account identifier) pair,
//! insert the freshly normalized batch. Everything happens inside a single
//! transaction, so a failed run leaves the previous state untouched.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::entities::prelude::{CloudAccounts, CostRecords, PerformanceRecords};
use crate::entities::{cloud_accounts, cost_records, performance_records};
use crate::error::TelemetryError;
use crate::models::record::{CostRecord, PerformanceRecord};
use crate::services::normalization::fetch_and_normalize_all_providers;

/// Row counts from one seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub cost_purged: u64,
    pub performance_purged: u64,
    pub cost_inserted: u64,
    pub performance_inserted: u64,
    pub accounts_created: u64,
}

/// Ensure an account row exists for every (provider, account identifier) pair
/// in the batch. New rows use the identifier as the display name and carry no
/// tags. Returns the pair-to-row-id cache and how many rows were created.
async fn ensure_cloud_accounts<C: ConnectionTrait>(
    conn: &C,
    costs: &[CostRecord],
    performance: &[PerformanceRecord],
) -> Result<(BTreeMap<(String, String), i32>, u64), TelemetryError> {
    let mut required: BTreeSet<(String, String)> = BTreeSet::new();
    for record in costs {
        required.insert((
            record.provider.as_str().to_string(),
            record.account_id.clone(),
        ));
    }
    for record in performance {
        required.insert((
            record.provider.as_str().to_string(),
            record.account_id.clone(),
        ));
    }

    let mut cache = BTreeMap::new();
    let mut created = 0u64;
    for (provider, account_identifier) in required {
        let existing = CloudAccounts::find()
            .filter(cloud_accounts::Column::Provider.eq(provider.as_str()))
            .filter(cloud_accounts::Column::AccountIdentifier.eq(account_identifier.as_str()))
            .one(conn)
            .await?;

        let id = match existing {
            Some(account) => account.id,
            None => {
                let inserted = cloud_accounts::ActiveModel {
                    provider: Set(provider.clone()),
                    account_name: Set(account_identifier.clone()),
                    account_identifier: Set(account_identifier.clone()),
                    tags: Set(None),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
                tracing::debug!("created cloud account {}/{}", provider, account_identifier);
                created += 1;
                inserted.id
            }
        };
        cache.insert((provider, account_identifier), id);
    }

    Ok((cache, created))
}

fn resolve_account_id(
    accounts: &BTreeMap<(String, String), i32>,
    provider: &str,
    identifier: &str,
) -> Result<i32, DbErr> {
    accounts
        .get(&(provider.to_string(), identifier.to_string()))
        .copied()
        .ok_or_else(|| DbErr::Custom(format!("missing cloud account {provider}/{identifier}")))
}

/// Replace the window's records with a freshly normalized batch. Re-running
/// the same window yields the same counts and creates no duplicate accounts.
pub async fn seed_window(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<SeedReport, TelemetryError> {
    tracing::info!("fetching normalized records for window {} -> {}", start, end);
    let (costs, performance) = fetch_and_normalize_all_providers(start, end)?;

    if costs.is_empty() && performance.is_empty() {
        tracing::warn!("no records returned for the requested window");
        return Ok(SeedReport::default());
    }

    let txn = db.begin().await?;

    let cost_purged = CostRecords::delete_many()
        .filter(cost_records::Column::Timestamp.gte(start))
        .filter(cost_records::Column::Timestamp.lte(end))
        .exec(&txn)
        .await?
        .rows_affected;
    let performance_purged = PerformanceRecords::delete_many()
        .filter(performance_records::Column::Timestamp.gte(start))
        .filter(performance_records::Column::Timestamp.lte(end))
        .exec(&txn)
        .await?
        .rows_affected;
    tracing::info!(
        "purged {} cost records and {} performance records in window",
        cost_purged,
        performance_purged
    );

    let (accounts, accounts_created) = ensure_cloud_accounts(&txn, &costs, &performance).await?;

    let mut cost_models = Vec::with_capacity(costs.len());
    for record in &costs {
        let account_id =
            resolve_account_id(&accounts, record.provider.as_str(), &record.account_id)?;
        cost_models.push(cost_records::ActiveModel {
            provider: Set(record.provider.as_str().to_string()),
            account_id: Set(account_id),
            service: Set(record.service.clone()),
            region: Set(record.region.clone()),
            usage_amount: Set(record.usage_amount),
            usage_unit: Set(record.usage_unit.clone()),
            cost_amount: Set(record.cost_amount),
            currency: Set(record.currency.clone()),
            timestamp: Set(record.timestamp),
            ..Default::default()
        });
    }

    let mut performance_models = Vec::with_capacity(performance.len());
    for record in &performance {
        let account_id =
            resolve_account_id(&accounts, record.provider.as_str(), &record.account_id)?;
        performance_models.push(performance_records::ActiveModel {
            provider: Set(record.provider.as_str().to_string()),
            account_id: Set(account_id),
            service: Set(record.service.clone()),
            region: Set(record.region.clone()),
            resource_id: Set(record.resource_id.clone()),
            cpu_utilization: Set(record.cpu_utilization),
            memory_utilization: Set(record.memory_utilization),
            network_io: Set(record.network_io),
            timestamp: Set(record.timestamp),
            ..Default::default()
        });
    }

    let cost_inserted = cost_models.len() as u64;
    let performance_inserted = performance_models.len() as u64;

    if !cost_models.is_empty() {
        CostRecords::insert_many(cost_models).exec(&txn).await?;
    }
    if !performance_models.is_empty() {
        PerformanceRecords::insert_many(performance_models)
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    tracing::info!(
        "inserted {} cost records and {} performance records",
        cost_inserted,
        performance_inserted
    );

    Ok(SeedReport {
        cost_purged,
        performance_purged,
        cost_inserted,
        performance_inserted,
        accounts_created,
    })
}
