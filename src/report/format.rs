//! Formatted terminal output for the `report` subcommand.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::agg::{MonthlyPaired, RecessionTables, ReportOutput, YearlyTables};
use crate::io::ingest::Dataset;

/// Format the dataset summary plus the four tables of the selected report.
pub fn format_report(dataset: &Dataset, output: &ReportOutput) -> String {
    let mut out = String::new();

    out.push_str("=== autodash - Automobile Sales Report ===\n");
    out.push_str(&format!(
        "Rows: {} used / {} read ({} skipped)\n",
        dataset.rows_used,
        dataset.rows_read,
        dataset.row_errors.len()
    ));
    out.push_str(&format!(
        "Years: {}-{} | Recession rows: {} | Vehicle types: {}\n\n",
        dataset.stats.year_min,
        dataset.stats.year_max,
        dataset.stats.recession_rows,
        dataset.stats.vehicle_types,
    ));

    match output {
        ReportOutput::Recession(tables) if tables.is_empty() => {
            out.push_str("Recession Period Statistics\n\n");
            out.push_str("No recession-period rows in the dataset.\n");
        }
        ReportOutput::Recession(tables) => format_recession(&mut out, tables),
        ReportOutput::Yearly(tables) => format_yearly(&mut out, tables),
        ReportOutput::NoYearData { year } => {
            out.push_str(&format!("Yearly Statistics - {year}\n\n"));
            out.push_str(&format!("No data available for year {year}\n"));
        }
    }

    out
}

/// The ASCII companion plot for the `report` subcommand: the monthly sales
/// series of the selected report. `None` when there is nothing to plot.
pub fn primary_plot(output: &ReportOutput, width: usize, height: usize) -> Option<String> {
    let series: Vec<(String, f64)> = match output {
        ReportOutput::Yearly(tables) => tables
            .sales_by_month
            .iter()
            .map(|&(m, v)| (m.to_string(), v))
            .collect(),
        ReportOutput::Recession(tables) => tables
            .sales_by_month
            .iter()
            .map(|&(m, v)| (m.to_string(), v))
            .collect(),
        ReportOutput::NoYearData { .. } => return None,
    };
    if series.is_empty() {
        return None;
    }

    let labels: Vec<String> = series.iter().map(|(l, _)| l.clone()).collect();
    let values: Vec<f64> = series.iter().map(|&(_, v)| v).collect();
    Some(crate::plot::render_line_plot(&labels, &values, width, height))
}

fn format_recession(out: &mut String, tables: &RecessionTables) {
    out.push_str("Recession Period Statistics\n\n");

    push_table(
        out,
        "Average automobile sales by vehicle type:",
        tables.sales_by_vehicle_type.iter().map(|(k, v)| (k.clone(), *v)),
    );
    push_table(
        out,
        "Average monthly vehicle sales:",
        tables.sales_by_month.iter().map(|&(m, v)| (m.to_string(), v)),
    );
    push_table(
        out,
        "Mean GDP by recession year:",
        tables.gdp_by_year.iter().map(|&(y, v)| (y.to_string(), v)),
    );
    push_table(
        out,
        "Mean unemployment rate by recession year (%):",
        tables.unemployment_by_year.iter().map(|&(y, v)| (y.to_string(), v)),
    );
}

fn format_yearly(out: &mut String, tables: &YearlyTables) {
    out.push_str(&format!("Yearly Statistics - {}\n\n", tables.year));

    push_table(
        out,
        "Monthly sales trend (total units):",
        tables.sales_by_month.iter().map(|&(m, v)| (m.to_string(), v)),
    );
    push_distribution(
        out,
        "Vehicle type sales distribution:",
        &tables.sales_by_vehicle_type,
    );
    push_table(
        out,
        "Quarterly advertising expenditure ($):",
        tables.ad_spend_by_quarter.iter().map(|&(q, v)| (q.to_string(), v)),
    );
    push_paired(out, "Sales vs consumer confidence:", &tables.sales_vs_confidence);
}

fn push_table(out: &mut String, title: &str, rows: impl IntoIterator<Item = (String, f64)>) {
    let rows: Vec<(String, f64)> = rows.into_iter().collect();
    let width = label_width(rows.iter().map(|(l, _)| l.as_str()));

    out.push_str(title);
    out.push('\n');
    for (label, value) in &rows {
        out.push_str(&format!("  {label:<width$}  {value:>14.2}\n"));
    }
    out.push('\n');
}

/// Distribution table with a share column, the text stand-in for the pie chart.
fn push_distribution(out: &mut String, title: &str, rows: &[(String, f64)]) {
    let total: f64 = rows.iter().map(|&(_, v)| v).sum();
    let width = label_width(rows.iter().map(|(l, _)| l.as_str()));

    out.push_str(title);
    out.push('\n');
    for (label, value) in rows {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let bar = "#".repeat((share / 2.5).round() as usize);
        out.push_str(&format!(
            "  {label:<width$}  {value:>14.2}  {share:>5.1}%  {bar}\n"
        ));
    }
    out.push('\n');
}

fn push_paired(out: &mut String, title: &str, rows: &[MonthlyPaired]) {
    out.push_str(title);
    out.push('\n');
    out.push_str("  Month     Total Sales  Mean Confidence\n");
    for p in rows {
        out.push_str(&format!(
            "  {:<8}  {:>11.2}  {:>15.2}\n",
            p.month.label(),
            p.total_sales,
            p.mean_confidence
        ));
    }
    out.push('\n');
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(str::len).max().unwrap_or(0).max(8)
}
