//! Export the derived tables to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts: CSV is long-format (one row per table cell), JSON mirrors the
//! report structure.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::agg::ReportOutput;
use crate::error::AppError;

/// One long-format export row. `secondary` is only set for the paired
/// sales/confidence table.
#[derive(Debug, PartialEq)]
pub struct ExportRow {
    pub table: &'static str,
    pub key: String,
    pub value: f64,
    pub secondary: Option<f64>,
}

/// Flatten a report into long-format rows, in table order.
pub fn table_rows(output: &ReportOutput) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    let mut push = |table: &'static str, key: String, value: f64, secondary: Option<f64>| {
        rows.push(ExportRow { table, key, value, secondary });
    };

    match output {
        ReportOutput::Recession(t) => {
            for (k, v) in &t.sales_by_vehicle_type {
                push("recession_sales_by_vehicle_type", k.clone(), *v, None);
            }
            for &(m, v) in &t.sales_by_month {
                push("recession_sales_by_month", m.to_string(), v, None);
            }
            for &(y, v) in &t.gdp_by_year {
                push("recession_gdp_by_year", y.to_string(), v, None);
            }
            for &(y, v) in &t.unemployment_by_year {
                push("recession_unemployment_by_year", y.to_string(), v, None);
            }
        }
        ReportOutput::Yearly(t) => {
            for &(m, v) in &t.sales_by_month {
                push("yearly_sales_by_month", m.to_string(), v, None);
            }
            for (k, v) in &t.sales_by_vehicle_type {
                push("yearly_sales_by_vehicle_type", k.clone(), *v, None);
            }
            for &(q, v) in &t.ad_spend_by_quarter {
                push("yearly_ad_spend_by_quarter", q.to_string(), v, None);
            }
            for p in &t.sales_vs_confidence {
                push(
                    "yearly_sales_vs_confidence",
                    p.month.to_string(),
                    p.total_sales,
                    Some(p.mean_confidence),
                );
            }
        }
        ReportOutput::NoYearData { .. } => {}
    }

    rows
}

/// Write the derived tables to a long-format CSV file.
pub fn write_tables_csv(path: &Path, output: &ReportOutput) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Header
    writeln!(file, "table,key,value,secondary")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in table_rows(output) {
        writeln!(
            file,
            "{},{},{:.6},{}",
            row.table,
            row.key,
            row.value,
            row.secondary.map(|v| format!("{v:.6}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the report to a JSON file, mirroring the in-memory table structure.
pub fn write_tables_json(path: &Path, output: &ReportOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, output)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::agg::{recession_report, yearly_report, YearlyReport};
    use crate::domain::{Month, SalesRecord};

    use super::*;

    fn rec(year: i32, month: Month, recession: bool, sales: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            year,
            month,
            recession,
            vehicle_type: "Sedan".to_string(),
            automobile_sales: sales,
            gdp: 100.0,
            unemployment_rate: 5.0,
            advertising_expenditure: 10.0,
            consumer_confidence: 90.0,
        }
    }

    #[test]
    fn yearly_rows_cover_all_four_tables() {
        let records = vec![rec(2019, Month::Jan, false, 100.0), rec(2019, Month::Feb, false, 200.0)];
        let YearlyReport::Tables(tables) = yearly_report(&records, 2019) else {
            panic!("expected tables");
        };
        let rows = table_rows(&ReportOutput::Yearly(tables));

        let tables_seen: Vec<&str> = rows.iter().map(|r| r.table).collect();
        assert!(tables_seen.contains(&"yearly_sales_by_month"));
        assert!(tables_seen.contains(&"yearly_sales_by_vehicle_type"));
        assert!(tables_seen.contains(&"yearly_ad_spend_by_quarter"));
        assert!(tables_seen.contains(&"yearly_sales_vs_confidence"));

        // Only the paired table carries a secondary value.
        for row in &rows {
            assert_eq!(
                row.secondary.is_some(),
                row.table == "yearly_sales_vs_confidence"
            );
        }
    }

    #[test]
    fn recession_rows_use_recession_table_names() {
        let records = vec![rec(2009, Month::Mar, true, 50.0)];
        let rows = table_rows(&ReportOutput::Recession(recession_report(&records)));
        assert!(rows.iter().all(|r| r.table.starts_with("recession_")));
        assert_eq!(
            rows.iter().filter(|r| r.table == "recession_gdp_by_year").count(),
            1
        );
    }

    #[test]
    fn no_year_data_exports_no_rows() {
        assert!(table_rows(&ReportOutput::NoYearData { year: 1999 }).is_empty());
    }
}
