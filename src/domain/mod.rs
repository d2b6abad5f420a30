//! Domain model for the sales dashboard.

mod types;

pub use types::{
    DashConfig, Month, Quarter, ReportMode, SalesRecord, DEFAULT_YEAR,
};
