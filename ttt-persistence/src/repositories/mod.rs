pub mod stats_store;
