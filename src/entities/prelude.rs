pub use super::cloud_accounts::Entity as CloudAccounts;
pub use super::cost_records::Entity as CostRecords;
pub use super::performance_records::Entity as PerformanceRecords;
