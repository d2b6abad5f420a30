//! Terminal text rendering of the derived tables.

mod format;

pub use format::{format_report, primary_plot};
