pub mod error;
pub mod repositories;

pub use error::StorageError;
pub use repositories::stats_store::{StatsMap, StatsStore};
