//! Shared report pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load dataset -> filter + aggregate per mode -> chart specs
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::agg::{recession_report, yearly_report, ReportOutput, YearlyReport};
use crate::charts::{build_view, DashView};
use crate::domain::{DashConfig, ReportMode, DEFAULT_YEAR};
use crate::error::AppError;
use crate::io::ingest::{self, Dataset};

/// All computed outputs of a single report run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub output: ReportOutput,
    pub view: DashView,
}

/// Load the dataset the way the config asks for: synthetic demo data or the
/// sales CSV. Either way the result is immutable for the rest of the run.
pub fn load_dataset(config: &DashConfig) -> Result<Dataset, AppError> {
    if config.demo {
        crate::data::sample::generate_dataset(config.demo_seed)
    } else {
        ingest::load_dataset(&config.csv_path)
    }
}

/// Resolve the effective year: an explicit request wins, otherwise the
/// dataset's initial year (2020 when present, else the latest year).
pub fn resolve_year(dataset: &Dataset, requested: Option<i32>) -> i32 {
    match requested {
        Some(year) => year,
        None => dataset.initial_year(DEFAULT_YEAR),
    }
}

/// Execute the aggregation pipeline for the current selectors.
///
/// Pure with respect to the dataset: every call recomputes the derived tables
/// fresh (no caching), so the output is a function of `(mode, year)` only.
pub fn run_report(dataset: &Dataset, mode: ReportMode, year: i32) -> RunOutput {
    let output = match mode {
        ReportMode::Recession => ReportOutput::Recession(recession_report(&dataset.records)),
        ReportMode::Yearly => match yearly_report(&dataset.records, year) {
            YearlyReport::Tables(tables) => ReportOutput::Yearly(tables),
            YearlyReport::NoData { year } => ReportOutput::NoYearData { year },
        },
    };
    let view = build_view(&output);
    RunOutput { output, view }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::{Month, SalesRecord};

    use super::*;

    fn dataset() -> Dataset {
        let records = vec![
            SalesRecord {
                date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
                year: 2019,
                month: Month::Jan,
                recession: false,
                vehicle_type: "Sedan".to_string(),
                automobile_sales: 100.0,
                gdp: 100.0,
                unemployment_rate: 5.0,
                advertising_expenditure: 10.0,
                consumer_confidence: 90.0,
            },
        ];
        Dataset::from_records(records, Vec::new(), 1).unwrap()
    }

    #[test]
    fn yearly_mode_routes_to_tables_or_sentinel() {
        let ds = dataset();
        let run = run_report(&ds, ReportMode::Yearly, 2019);
        assert!(matches!(run.output, ReportOutput::Yearly(_)));
        let run = run_report(&ds, ReportMode::Yearly, 1999);
        assert!(matches!(run.output, ReportOutput::NoYearData { year: 1999 }));
        assert!(matches!(run.view, DashView::Empty { .. }));
    }

    #[test]
    fn resolve_year_prefers_explicit_request() {
        let ds = dataset();
        assert_eq!(resolve_year(&ds, Some(1999)), 1999);
        // 2020 is absent, so the latest available year wins.
        assert_eq!(resolve_year(&ds, None), 2019);
    }
}
