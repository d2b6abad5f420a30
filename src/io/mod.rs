//! Input/output: CSV ingest and table exports.

pub mod export;
pub mod ingest;

pub use ingest::{Dataset, DatasetStats, RowError};
