//! Add timestamp indexes for the time-window aggregation queries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every summary/recommendation query filters on timestamp >= window_start
        manager
            .create_index(
                Index::create()
                    .name("idx_cost_records_timestamp")
                    .table(CostRecords::Table)
                    .col(CostRecords::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_records_timestamp")
                    .table(PerformanceRecords::Table)
                    .col(PerformanceRecords::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cost_records_timestamp")
                    .table(CostRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_performance_records_timestamp")
                    .table(PerformanceRecords::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CostRecords {
    Table,
    Timestamp,
}

#[derive(DeriveIden)]
enum PerformanceRecords {
    Table,
    Timestamp,
}
