//! Yearly statistics for a single selected year.

use std::collections::BTreeMap;

use crate::domain::{Month, SalesRecord};

use super::{sum_grouped, MonthlyPaired, YearlyReport, YearlyTables};

/// Compute the four yearly tables for `year`.
///
/// A year with no rows returns the `NoData` sentinel; the presentation layer
/// renders a "no data available for year Y" message instead of charts.
pub fn yearly_report(records: &[SalesRecord], year: i32) -> YearlyReport {
    let rows: Vec<&SalesRecord> = records.iter().filter(|r| r.year == year).collect();
    if rows.is_empty() {
        return YearlyReport::NoData { year };
    }

    YearlyReport::Tables(YearlyTables {
        year,
        sales_by_month: sum_grouped(&rows, |r| r.month, |r| r.automobile_sales),
        sales_by_vehicle_type: sum_grouped(&rows, |r| r.vehicle_type.clone(), |r| r.automobile_sales),
        ad_spend_by_quarter: sum_grouped(&rows, |r| r.month.quarter(), |r| r.advertising_expenditure),
        sales_vs_confidence: paired_by_month(&rows),
    })
}

/// Per-month sum of sales and mean of consumer confidence, aligned by month.
fn paired_by_month(rows: &[&SalesRecord]) -> Vec<MonthlyPaired> {
    let mut acc: BTreeMap<Month, (f64, f64, usize)> = BTreeMap::new();
    for r in rows {
        let entry = acc.entry(r.month).or_insert((0.0, 0.0, 0));
        entry.0 += r.automobile_sales;
        entry.1 += r.consumer_confidence;
        entry.2 += 1;
    }
    acc.into_iter()
        .map(|(month, (sales, conf, n))| MonthlyPaired {
            month,
            total_sales: sales,
            mean_confidence: conf / n as f64,
        })
        .collect()
}
