//! `cost_records` table. Normalized billing line items across all providers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider: String,
    pub account_id: i32,
    pub service: String,
    pub region: String,
    pub usage_amount: f64,
    pub usage_unit: String,
    pub cost_amount: f64,
    pub currency: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cloud_accounts::Entity",
        from = "Column::AccountId",
        to = "super::cloud_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CloudAccounts,
}

impl Related<super::cloud_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CloudAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
