//! Synthetic automobile-sales dataset for `--demo` runs.
//!
//! Generates one row per (year, month, vehicle type) with a seasonal sales
//! cycle, two recession windows, and loosely co-moving macro indicators.
//! Generation is seeded, so the same seed always produces the same dataset.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Month, SalesRecord};
use crate::error::AppError;
use crate::io::ingest::Dataset;

const FIRST_YEAR: i32 = 2005;
const LAST_YEAR: i32 = 2023;

/// Baseline monthly sales per vehicle type, before seasonality and noise.
const VEHICLE_TYPES: [(&str, f64); 5] = [
    ("Executive car", 420.0),
    ("Medium family car", 980.0),
    ("Small family car", 1250.0),
    ("Sports", 160.0),
    ("Supermini", 830.0),
];

/// Recession windows baked into the demo data: the 2008-2009 downturn and the
/// spring-2020 shock.
fn in_recession(year: i32, month: Month) -> bool {
    let m = month.ordinal();
    match year {
        2008 => m >= Month::Jun.ordinal(),
        2009 => m <= Month::Jun.ordinal(),
        2020 => (Month::Feb.ordinal()..=Month::Apr.ordinal()).contains(&m),
        _ => false,
    }
}

/// Generate the demo dataset. Deterministic per seed.
pub fn generate_dataset(seed: u64) -> Result<Dataset, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut records = Vec::new();

    for year in FIRST_YEAR..=LAST_YEAR {
        let growth = 1.0 + 0.015 * f64::from(year - FIRST_YEAR);

        for month in Month::ALL {
            let recession = in_recession(year, month);
            let m = month.ordinal() as f64;

            // Sales peak in spring/early summer and dip around year end.
            let seasonal = 1.0 + 0.22 * (std::f64::consts::TAU * (m - 2.0) / 12.0).sin();
            let demand = if recession { 0.62 } else { 1.0 };

            let gdp = 90.0 * growth * if recession { 0.96 } else { 1.0 }
                + noise.sample(&mut rng) * 0.8;
            let unemployment_rate = (if recession { 8.6 } else { 5.1 }
                + noise.sample(&mut rng) * 0.3)
                .max(0.0);
            let consumer_confidence = (if recession { 78.0 } else { 98.0 }
                + noise.sample(&mut rng) * 4.0)
                .max(0.0);

            let date = NaiveDate::from_ymd_opt(year, month.ordinal() as u32 + 1, 1)
                .ok_or_else(|| AppError::new(4, "Invalid demo date."))?;

            for (vehicle_type, base) in VEHICLE_TYPES {
                let wobble = 1.0 + 0.08 * noise.sample(&mut rng);
                let automobile_sales = (base * growth * seasonal * demand * wobble).max(0.0);
                let advertising_expenditure =
                    (automobile_sales * 12.5 * (1.0 + 0.1 * noise.sample(&mut rng))).max(0.0);

                records.push(SalesRecord {
                    date,
                    year,
                    month,
                    recession,
                    vehicle_type: vehicle_type.to_string(),
                    automobile_sales,
                    gdp,
                    unemployment_rate,
                    advertising_expenditure,
                    consumer_confidence,
                });
            }
        }
    }

    let rows_read = records.len();
    Dataset::from_records(records, Vec::new(), rows_read)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_seed() {
        let a = generate_dataset(7).unwrap();
        let b = generate_dataset(7).unwrap();
        assert_eq!(a.records, b.records);

        let c = generate_dataset(8).unwrap();
        assert_ne!(a.records, c.records);
    }

    #[test]
    fn covers_expected_years_and_shapes() {
        let ds = generate_dataset(42).unwrap();
        assert_eq!(ds.years.first(), Some(&FIRST_YEAR));
        assert_eq!(ds.years.last(), Some(&LAST_YEAR));
        assert_eq!(ds.stats.vehicle_types, VEHICLE_TYPES.len());
        // One row per (year, month, type).
        let expected = (LAST_YEAR - FIRST_YEAR + 1) as usize * 12 * VEHICLE_TYPES.len();
        assert_eq!(ds.records.len(), expected);
    }

    #[test]
    fn contains_both_recession_windows() {
        let ds = generate_dataset(42).unwrap();
        assert!(ds.records.iter().any(|r| r.year == 2009 && r.recession));
        assert!(ds
            .records
            .iter()
            .any(|r| r.year == 2020 && r.month == Month::Mar && r.recession));
        assert!(!ds.records.iter().any(|r| r.year == 2015 && r.recession));
    }
}
