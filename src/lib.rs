// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod cloud_accounts;
    pub mod cost_records;
    pub mod performance_records;
}

pub mod services {
    pub mod normalization;
    pub mod optimization;
    pub mod summary;
}

pub mod error;
pub mod models;
pub mod handlers;
pub mod jobs;
pub mod providers;
