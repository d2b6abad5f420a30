//! Recession-period statistics.

use crate::domain::SalesRecord;

use super::{mean_grouped, RecessionTables};

/// Compute the four recession-period tables across all recession-flagged
/// rows, regardless of year.
///
/// A dataset with zero recession rows yields four empty tables; the
/// presentation layer renders that as an explicit no-data state.
pub fn recession_report(records: &[SalesRecord]) -> RecessionTables {
    let rows: Vec<&SalesRecord> = records.iter().filter(|r| r.recession).collect();

    RecessionTables {
        sales_by_vehicle_type: mean_grouped(&rows, |r| r.vehicle_type.clone(), |r| r.automobile_sales),
        sales_by_month: mean_grouped(&rows, |r| r.month, |r| r.automobile_sales),
        gdp_by_year: mean_grouped(&rows, |r| r.year, |r| r.gdp),
        unemployment_by_year: mean_grouped(&rows, |r| r.year, |r| r.unemployment_rate),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::Month;

    use super::*;

    fn rec(year: i32, month: Month, recession: bool, vtype: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            year,
            month,
            recession,
            vehicle_type: vtype.to_string(),
            automobile_sales: sales,
            gdp: 100.0,
            unemployment_rate: 5.0,
            advertising_expenditure: 10.0,
            consumer_confidence: 90.0,
        }
    }

    #[test]
    fn zero_recession_rows_yield_empty_tables() {
        let records = vec![
            rec(2019, Month::Jan, false, "Sedan", 100.0),
            rec(2019, Month::Feb, false, "SUV", 200.0),
        ];
        let tables = recession_report(&records);
        assert!(tables.is_empty());
    }

    #[test]
    fn means_are_per_group_averages() {
        let mut a = rec(2008, Month::Jan, true, "Sedan", 100.0);
        a.gdp = 90.0;
        a.unemployment_rate = 8.0;
        let mut b = rec(2008, Month::Feb, true, "Sedan", 300.0);
        b.gdp = 110.0;
        b.unemployment_rate = 10.0;
        // Non-recession noise that must not contribute.
        let c = rec(2008, Month::Mar, false, "Sedan", 999.0);

        let tables = recession_report(&[a, b, c]);
        assert_eq!(tables.sales_by_vehicle_type, vec![("Sedan".to_string(), 200.0)]);
        assert_eq!(tables.gdp_by_year, vec![(2008, 100.0)]);
        assert_eq!(tables.unemployment_by_year, vec![(2008, 9.0)]);
        assert_eq!(
            tables.sales_by_month,
            vec![(Month::Jan, 100.0), (Month::Feb, 300.0)]
        );
    }

    #[test]
    fn recession_spans_multiple_years_sorted_ascending() {
        let records = vec![
            rec(2020, Month::Mar, true, "SUV", 50.0),
            rec(2008, Month::Nov, true, "Sedan", 60.0),
            rec(2009, Month::Jan, true, "Sedan", 70.0),
        ];
        let tables = recession_report(&records);
        let years: Vec<i32> = tables.gdp_by_year.iter().map(|&(y, _)| y).collect();
        assert_eq!(years, vec![2008, 2009, 2020]);
    }

    #[test]
    fn month_axis_is_canonical_order() {
        let records = vec![
            rec(2008, Month::Nov, true, "Sedan", 1.0),
            rec(2008, Month::Apr, true, "Sedan", 2.0),
            rec(2008, Month::Jan, true, "Sedan", 3.0),
        ];
        let tables = recession_report(&records);
        let months: Vec<Month> = tables.sales_by_month.iter().map(|&(m, _)| m).collect();
        assert_eq!(months, vec![Month::Jan, Month::Apr, Month::Nov]);
    }

    #[test]
    fn idempotent_over_identical_input() {
        let records = vec![
            rec(2008, Month::Jan, true, "Sedan", 100.0),
            rec(2009, Month::Feb, true, "SUV", 200.0),
        ];
        assert_eq!(recession_report(&records), recession_report(&records));
    }
}
