//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON/CSV
//! - rendered by both the TUI and the text report

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Year pre-selected at startup when present in the dataset.
///
/// If the dataset does not contain it, the latest available year is used
/// instead.
pub const DEFAULT_YEAR: i32 = 2020;

/// A calendar month token as it appears in the dataset.
///
/// The source CSV carries three-letter month names ("Jan".."Dec"), which do
/// not sort correctly as strings ("Apr" < "Jan"). Every grouping that touches
/// months goes through this enum, whose declaration order *is* the canonical
/// calendar order, so all four chart tables agree on the axis ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in canonical order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Parse a three-letter month token (case-insensitive).
    pub fn parse(token: &str) -> Option<Month> {
        let token = token.trim();
        Month::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(token))
    }

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Zero-based position in the canonical order (Jan = 0).
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Fixed month → quarter mapping (Jan/Feb/Mar → Q1, ... Oct/Nov/Dec → Q4).
    pub fn quarter(self) -> Quarter {
        match self.ordinal() / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A calendar quarter derived from `Month`. Ordering is Q1 < Q2 < Q3 < Q4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level report selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Statistics for a single selected year.
    Yearly,
    /// Statistics across all recession-flagged rows, regardless of year.
    Recession,
}

impl ReportMode {
    /// Human-readable label used for headings and the TUI selector.
    pub fn display_name(self) -> &'static str {
        match self {
            ReportMode::Yearly => "Yearly Statistics",
            ReportMode::Recession => "Recession Period Statistics",
        }
    }

    pub fn toggled(self) -> ReportMode {
        match self {
            ReportMode::Yearly => ReportMode::Recession,
            ReportMode::Recession => ReportMode::Yearly,
        }
    }
}

/// One validated row of the historical automobile sales dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: Month,
    /// Recession flag (CSV-encoded as 0/1).
    pub recession: bool,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub gdp: f64,
    pub unemployment_rate: f64,
    pub advertising_expenditure: f64,
    pub consumer_confidence: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub csv_path: PathBuf,
    /// Use the built-in synthetic dataset instead of reading a CSV.
    pub demo: bool,
    pub demo_seed: u64,

    pub mode: ReportMode,
    /// Selected year for yearly mode. `None` means "pick a default from the
    /// dataset" (see `DEFAULT_YEAR`).
    pub year: Option<i32>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parse_is_case_insensitive() {
        assert_eq!(Month::parse("Jan"), Some(Month::Jan));
        assert_eq!(Month::parse("  dec "), Some(Month::Dec));
        assert_eq!(Month::parse("SEP"), Some(Month::Sep));
        assert_eq!(Month::parse("January"), None);
        assert_eq!(Month::parse(""), None);
    }

    #[test]
    fn month_order_is_calendar_order_not_lexicographic() {
        // "Apr" < "Jan" as strings; the enum must order them the other way.
        assert!(Month::Jan < Month::Apr);
        let mut months = vec![Month::Nov, Month::Feb, Month::Jan];
        months.sort();
        assert_eq!(months, vec![Month::Jan, Month::Feb, Month::Nov]);
    }

    #[test]
    fn quarter_mapping_matches_fixed_table() {
        assert_eq!(Month::Jan.quarter(), Quarter::Q1);
        assert_eq!(Month::Feb.quarter(), Quarter::Q1);
        assert_eq!(Month::Mar.quarter(), Quarter::Q1);
        assert_eq!(Month::Apr.quarter(), Quarter::Q2);
        assert_eq!(Month::Jun.quarter(), Quarter::Q2);
        assert_eq!(Month::Sep.quarter(), Quarter::Q3);
        assert_eq!(Month::Nov.quarter(), Quarter::Q4);
        assert_eq!(Month::Dec.quarter(), Quarter::Q4);
    }

    #[test]
    fn quarter_order() {
        assert!(Quarter::Q1 < Quarter::Q2);
        assert!(Quarter::Q3 < Quarter::Q4);
    }
}
