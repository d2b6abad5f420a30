//! The aggregation pipeline.
//!
//! Two pure operations, selected by report mode:
//!
//! - [`recession_report`]: statistics across all recession-flagged rows
//! - [`yearly_report`]: statistics for a single selected year
//!
//! Both group rows and reduce with sums/means, producing the four derived
//! tables each report renders. Grouping goes through `BTreeMap`, so every
//! table comes out in its key's canonical order (`Month` and `Quarter` order
//! by declaration, years ascend, vehicle types alphabetically) without any
//! per-call sorting logic.

mod recession;
mod tables;
mod yearly;

pub use recession::recession_report;
pub use tables::{
    CategorySeries, MonthSeries, MonthlyPaired, QuarterSeries, RecessionTables, ReportOutput,
    YearSeries, YearlyReport, YearlyTables,
};
pub use yearly::yearly_report;

use std::collections::BTreeMap;

use crate::domain::SalesRecord;

/// Group `rows` by `key` and sum `value` within each group.
fn sum_grouped<K, KF, VF>(rows: &[&SalesRecord], key: KF, value: VF) -> Vec<(K, f64)>
where
    K: Ord,
    KF: Fn(&SalesRecord) -> K,
    VF: Fn(&SalesRecord) -> f64,
{
    let mut acc: BTreeMap<K, f64> = BTreeMap::new();
    for r in rows {
        *acc.entry(key(r)).or_insert(0.0) += value(r);
    }
    acc.into_iter().collect()
}

/// Group `rows` by `key` and average `value` within each group.
fn mean_grouped<K, KF, VF>(rows: &[&SalesRecord], key: KF, value: VF) -> Vec<(K, f64)>
where
    K: Ord,
    KF: Fn(&SalesRecord) -> K,
    VF: Fn(&SalesRecord) -> f64,
{
    let mut acc: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for r in rows {
        let entry = acc.entry(key(r)).or_insert((0.0, 0));
        entry.0 += value(r);
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}
