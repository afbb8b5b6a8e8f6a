pub use sea_orm_migration::prelude::*;

mod m20260715_000001_create_telemetry_tables;
mod m20260722_000001_add_record_timestamp_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_create_telemetry_tables::Migration),
            Box::new(m20260722_000001_add_record_timestamp_indexes::Migration),
        ]
    }
}
