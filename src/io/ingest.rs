//! CSV ingest and normalization.
//!
//! This module turns the historical automobile sales CSV into an immutable
//! `Dataset` of validated `SalesRecord`s that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here
//!
//! The dataset is loaded once at startup and never mutated afterwards; the
//! aggregation pipeline only ever produces new derived tables from it.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Month, SalesRecord};
use crate::error::AppError;

/// Columns the loader refuses to run without.
const REQUIRED_COLUMNS: [&str; 10] = [
    "date",
    "year",
    "month",
    "recession",
    "vehicle_type",
    "automobile_sales",
    "gdp",
    "unemployment_rate",
    "advertising_expenditure",
    "consumer_confidence",
];

/// Summary stats about the rows actually kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub recession_rows: usize,
    pub vehicle_types: usize,
    pub total_sales: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// The loaded, immutable dataset plus ingest diagnostics.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<SalesRecord>,
    /// Sorted, de-duplicated years present in the data (the year selector).
    pub years: Vec<i32>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl Dataset {
    /// Build a dataset from already-validated records (used by the ingest
    /// path below and by the synthetic demo generator).
    pub fn from_records(
        records: Vec<SalesRecord>,
        row_errors: Vec<RowError>,
        rows_read: usize,
    ) -> Result<Dataset, AppError> {
        if records.is_empty() {
            return Err(AppError::new(
                3,
                "No valid rows remain after validation; cannot start without data.",
            ));
        }

        let years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let stats = compute_stats(&records);
        let rows_used = records.len();

        Ok(Dataset {
            records,
            years,
            stats,
            row_errors,
            rows_read,
            rows_used,
        })
    }

    /// Year shown when the dashboard starts: `preferred` when present,
    /// otherwise the latest year in the data.
    pub fn initial_year(&self, preferred: i32) -> i32 {
        if self.years.contains(&preferred) {
            preferred
        } else {
            // `from_records` rejects empty datasets, so `years` is non-empty.
            *self.years.last().unwrap_or(&preferred)
        }
    }
}

/// Load and validate the sales CSV from a file path.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_dataset(file)
}

/// Load and validate the sales CSV from any reader (testable without files).
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => records.push(row),
            Err(e) => row_errors.push(RowError { line, message: e }),
        }
    }

    Dataset::from_records(records, row_errors, rows_read)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    let date = parse_date(get_required(record, header_map, "date")?)?;
    let year = parse_i32(get_required(record, header_map, "year")?, "year")?;

    let month_token = get_required(record, header_map, "month")?;
    let month = Month::parse(month_token)
        .ok_or_else(|| format!("Invalid month token '{month_token}' (expected Jan..Dec)."))?;

    let recession = parse_flag(get_required(record, header_map, "recession")?)?;
    let vehicle_type = get_required(record, header_map, "vehicle_type")?.to_string();

    let automobile_sales = parse_f64(get_required(record, header_map, "automobile_sales")?, "automobile_sales")?;
    let gdp = parse_f64(get_required(record, header_map, "gdp")?, "gdp")?;
    let unemployment_rate = parse_f64(
        get_required(record, header_map, "unemployment_rate")?,
        "unemployment_rate",
    )?;
    let advertising_expenditure = parse_f64(
        get_required(record, header_map, "advertising_expenditure")?,
        "advertising_expenditure",
    )?;
    let consumer_confidence = parse_f64(
        get_required(record, header_map, "consumer_confidence")?,
        "consumer_confidence",
    )?;

    Ok(SalesRecord {
        date,
        year,
        month,
        recession,
        vehicle_type,
        automobile_sales,
        gdp,
        unemployment_rate,
        advertising_expenditure,
        consumer_confidence,
    })
}

fn compute_stats(records: &[SalesRecord]) -> DatasetStats {
    let mut year_min = i32::MAX;
    let mut year_max = i32::MIN;
    let mut recession_rows = 0usize;
    let mut total_sales = 0.0;
    let mut vehicle_types = BTreeSet::new();

    for r in records {
        year_min = year_min.min(r.year);
        year_max = year_max.max(r.year);
        if r.recession {
            recession_rows += 1;
        }
        total_sales += r.automobile_sales;
        vehicle_types.insert(r.vehicle_type.as_str());
    }

    DatasetStats {
        n_rows: records.len(),
        year_min,
        year_max,
        recession_rows,
        vehicle_types: vehicle_types.len(),
        total_sales,
    }
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // The reference dataset uses ISO dates, but spreadsheet exports often use
    // slash or day-first variants. We accept a small set of common formats to
    // reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, MM/DD/YYYY, DD/MM/YYYY, YYYY/MM/DD."
    ))
}

fn parse_i32(s: &str, name: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("Invalid integer for `{name}`: '{s}'"))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid number for `{name}`: '{s}'"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite number for `{name}`: '{s}'"))
    }
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        _ if s.eq_ignore_ascii_case("false") => Ok(false),
        _ if s.eq_ignore_ascii_case("true") => Ok(true),
        _ => Err(format!("Invalid recession flag '{s}' (expected 0 or 1).")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Year,Month,Recession,Vehicle_Type,Automobile_Sales,GDP,unemployment_rate,Advertising_Expenditure,Consumer_Confidence";

    fn row(year: i32, month: &str, recession: u8, vtype: &str, sales: f64) -> String {
        format!("{year}-01-01,{year},{month},{recession},{vtype},{sales},100.0,5.0,1000.0,95.0")
    }

    #[test]
    fn reads_well_formed_csv() {
        let csv = format!(
            "{HEADER}\n{}\n{}\n",
            row(2019, "Jan", 0, "Sedan", 100.0),
            row(2020, "Feb", 1, "SUV", 200.0),
        );
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows_read, 2);
        assert_eq!(ds.rows_used, 2);
        assert!(ds.row_errors.is_empty());
        assert_eq!(ds.years, vec![2019, 2020]);
        assert_eq!(ds.stats.recession_rows, 1);
        assert_eq!(ds.stats.vehicle_types, 2);
        assert_eq!(ds.records[0].month, Month::Jan);
        assert!(!ds.records[0].recession);
        assert!(ds.records[1].recession);
    }

    #[test]
    fn strips_bom_from_first_header() {
        let csv = format!("\u{feff}{HEADER}\n{}\n", row(2019, "Jan", 0, "Sedan", 1.0));
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows_used, 1);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Date,Year,Month\n2019-01-01,2019,Jan\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("recession"));
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = format!(
            "{HEADER}\n{}\n2020-13-01,2020,Smarch,2,SUV,x,y,z,w,v\n{}\n",
            row(2019, "Jan", 0, "Sedan", 1.0),
            row(2020, "Feb", 1, "SUV", 2.0),
        );
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows_read, 3);
        assert_eq!(ds.rows_used, 2);
        assert_eq!(ds.row_errors.len(), 1);
        assert_eq!(ds.row_errors[0].line, 3);
    }

    #[test]
    fn all_rows_invalid_is_fatal() {
        let csv = format!("{HEADER}\nnot-a-date,x,Smarch,9,,,,,,\n");
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn initial_year_prefers_default_then_latest() {
        let csv = format!(
            "{HEADER}\n{}\n{}\n",
            row(2018, "Jan", 0, "Sedan", 1.0),
            row(2019, "Feb", 0, "Sedan", 2.0),
        );
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.initial_year(2019), 2019);
        assert_eq!(ds.initial_year(2020), 2019);
    }
}
