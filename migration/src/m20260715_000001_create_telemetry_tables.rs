//! Migration to create the unified telemetry tables.
//!
//! One cloud_accounts row per (provider, account_identifier); cost and
//! performance records cascade-delete with their account.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create cloud_accounts table
        manager
            .create_table(
                Table::create()
                    .table(CloudAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CloudAccounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CloudAccounts::Provider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CloudAccounts::AccountName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CloudAccounts::AccountIdentifier)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CloudAccounts::Tags).json())
                    .to_owned(),
            )
            .await?;

        // Create cost_records table.
        // Foreign keys are declared inline so the same migration works on
        // SQLite, which cannot add constraints after table creation.
        manager
            .create_table(
                Table::create()
                    .table(CostRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CostRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CostRecords::Provider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CostRecords::AccountId).integer().not_null())
                    .col(
                        ColumnDef::new(CostRecords::Service)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CostRecords::Region)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CostRecords::UsageAmount).double().not_null())
                    .col(
                        ColumnDef::new(CostRecords::UsageUnit)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CostRecords::CostAmount).double().not_null())
                    .col(
                        ColumnDef::new(CostRecords::Currency)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CostRecords::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cost_records_account_id")
                            .from(CostRecords::Table, CostRecords::AccountId)
                            .to(CloudAccounts::Table, CloudAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create performance_records table
        manager
            .create_table(
                Table::create()
                    .table(PerformanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerformanceRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::Provider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::AccountId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::ResourceId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::Service)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::Region)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::CpuUtilization)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::MemoryUtilization)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::NetworkIo)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceRecords::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_records_account_id")
                            .from(PerformanceRecords::Table, PerformanceRecords::AccountId)
                            .to(CloudAccounts::Table, CloudAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for account-scoped lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_cost_records_account")
                    .table(CostRecords::Table)
                    .col(CostRecords::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_records_account")
                    .table(PerformanceRecords::Table)
                    .col(PerformanceRecords::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PerformanceRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CostRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CloudAccounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CloudAccounts {
    Table,
    Id,
    Provider,
    AccountName,
    AccountIdentifier,
    Tags,
}

#[derive(DeriveIden)]
enum CostRecords {
    Table,
    Id,
    Provider,
    AccountId,
    Service,
    Region,
    UsageAmount,
    UsageUnit,
    CostAmount,
    Currency,
    Timestamp,
}

#[derive(DeriveIden)]
enum PerformanceRecords {
    Table,
    Id,
    Provider,
    AccountId,
    Service,
    Region,
    ResourceId,
    CpuUtilization,
    MemoryUtilization,
    NetworkIo,
    Timestamp,
}
