pub mod provider;
pub mod record;
pub mod recommendation;
pub mod summary;
pub mod workload;
