//! Derived table types produced by the aggregation pipeline.
//!
//! Each table is an ordered list of `(key, value)` pairs; keys with zero
//! matching rows are omitted rather than zero-filled, consistently across all
//! tables. Tables are serializable so the `report` subcommand can export them
//! as JSON.

use serde::Serialize;

use crate::domain::{Month, Quarter};

/// Grouped by vehicle type (alphabetical).
pub type CategorySeries = Vec<(String, f64)>;
/// Grouped by month (canonical Jan..Dec order).
pub type MonthSeries = Vec<(Month, f64)>;
/// Grouped by derived quarter (Q1..Q4 order).
pub type QuarterSeries = Vec<(Quarter, f64)>;
/// Grouped by year (ascending).
pub type YearSeries = Vec<(i32, f64)>;

/// The four recession-period tables. All four are empty when the dataset has
/// no recession-flagged rows; that is a valid, renderable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecessionTables {
    /// Mean automobile sales per vehicle type.
    pub sales_by_vehicle_type: CategorySeries,
    /// Mean automobile sales per month.
    pub sales_by_month: MonthSeries,
    /// Mean GDP per recession year.
    pub gdp_by_year: YearSeries,
    /// Mean unemployment rate per recession year.
    pub unemployment_by_year: YearSeries,
}

impl RecessionTables {
    pub fn is_empty(&self) -> bool {
        self.sales_by_vehicle_type.is_empty()
            && self.sales_by_month.is_empty()
            && self.gdp_by_year.is_empty()
            && self.unemployment_by_year.is_empty()
    }
}

/// One month of the paired sales/confidence table (dual-axis chart input).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPaired {
    pub month: Month,
    pub total_sales: f64,
    pub mean_confidence: f64,
}

/// The four yearly tables for a year that has data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTables {
    pub year: i32,
    /// Total automobile sales per month.
    pub sales_by_month: MonthSeries,
    /// Total automobile sales per vehicle type.
    pub sales_by_vehicle_type: CategorySeries,
    /// Total advertising expenditure per derived quarter.
    pub ad_spend_by_quarter: QuarterSeries,
    /// Paired per-month totals and mean consumer confidence, aligned by month.
    pub sales_vs_confidence: Vec<MonthlyPaired>,
}

/// Yearly-mode result: either four tables, or an explicit empty-selection
/// sentinel for a year with no rows (not an error).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum YearlyReport {
    Tables(YearlyTables),
    NoData { year: i32 },
}

/// The output of one pipeline run, whichever mode produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ReportOutput {
    Recession(RecessionTables),
    Yearly(YearlyTables),
    NoYearData { year: i32 },
}
