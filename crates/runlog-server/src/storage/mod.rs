//! Storage layer
//!
//! PostgreSQL for durable records, a locked in-process list for ephemeral
//! ones. Both implement [`runlog_core::StatisticStore`].

pub mod db;
pub mod memory;

pub use db::PgStatisticStore;
pub use memory::MemoryStatisticStore;
