//! `cloud_accounts` table. One row per (provider, account identifier) pair,
//! e.g. an AWS account, an Azure subscription or a GCP project.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cloud_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Provider key, stored uppercase ("AWS", "AZURE", "GCP").
    pub provider: String,
    /// Human-readable label for dashboards.
    pub account_name: String,
    /// Provider-native identifier (account id, subscription path, project path).
    #[sea_orm(unique)]
    pub account_identifier: String,
    pub tags: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cost_records::Entity")]
    CostRecords,
    #[sea_orm(has_many = "super::performance_records::Entity")]
    PerformanceRecords,
}

impl Related<super::cost_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostRecords.def()
    }
}

impl Related<super::performance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
