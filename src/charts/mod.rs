//! Presentation adapter: derived tables → renderable chart specifications.
//!
//! The widget layer is intentionally data-driven: all series, labels and
//! bounds are computed here, outside the render call. Each of the eight
//! table→chart assignments (four per mode) is a fixed mapping that does not
//! vary by data content, only by mode/year for the title text.

use crate::agg::{MonthlyPaired, RecessionTables, ReportOutput, YearlyTables};

/// Dashboard palette (carried over from the original report styling).
pub const STEEL_BLUE: (u8, u8, u8) = (46, 134, 171);
pub const PLUM: (u8, u8, u8) = (162, 59, 114);
pub const AMBER: (u8, u8, u8) = (241, 143, 1);

/// How a panel is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Vertical bars over a categorical x axis.
    Bar,
    /// Line with point markers over an ordered categorical x axis.
    Line,
    /// Point markers only.
    Scatter,
    /// Filled area under an ordered series.
    Area,
    /// Share-of-total panel (the terminal stand-in for a pie chart).
    Proportion,
    /// Two series on independent y axes, aligned on the same x axis.
    DualAxisLine,
}

/// A render-only description of one chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Secondary axis label; only set for `DualAxisLine`.
    pub y2_label: Option<&'static str>,
    pub color: (u8, u8, u8),
    /// X-axis categories in display order.
    pub categories: Vec<String>,
    /// Primary series, aligned with `categories`.
    pub values: Vec<f64>,
    /// Secondary series for `DualAxisLine`; empty otherwise.
    pub secondary: Vec<f64>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A full report ready to render: a heading plus four chart panels.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub heading: String,
    pub charts: Vec<ChartSpec>,
}

/// What the output region shows: a report, or an explicit no-data message.
#[derive(Debug, Clone, PartialEq)]
pub enum DashView {
    Report(ReportView),
    Empty { heading: String, message: String },
}

/// Map a pipeline output to its view. Static lookup; no aggregation happens
/// here, only field selection.
pub fn build_view(output: &ReportOutput) -> DashView {
    match output {
        ReportOutput::Recession(tables) if tables.is_empty() => DashView::Empty {
            heading: "Recession Period Statistics".to_string(),
            message: "No recession-period rows in the dataset.".to_string(),
        },
        ReportOutput::Recession(tables) => DashView::Report(recession_view(tables)),
        ReportOutput::Yearly(tables) => DashView::Report(yearly_view(tables)),
        ReportOutput::NoYearData { year } => DashView::Empty {
            heading: format!("Yearly Statistics - {year}"),
            message: format!("No data available for year {year}"),
        },
    }
}

fn recession_view(tables: &RecessionTables) -> ReportView {
    let vehicle = ChartSpec {
        kind: ChartKind::Bar,
        title: "Average Automobile Sales by Vehicle Type During Recession".to_string(),
        x_label: "Vehicle Type",
        y_label: "Average Sales",
        y2_label: None,
        color: STEEL_BLUE,
        categories: tables.sales_by_vehicle_type.iter().map(|(k, _)| k.clone()).collect(),
        values: tables.sales_by_vehicle_type.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let monthly = ChartSpec {
        kind: ChartKind::Line,
        title: "Average Monthly Vehicle Sales During Recession".to_string(),
        x_label: "Month",
        y_label: "Average Sales",
        y2_label: None,
        color: STEEL_BLUE,
        categories: tables.sales_by_month.iter().map(|&(m, _)| m.to_string()).collect(),
        values: tables.sales_by_month.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let gdp = ChartSpec {
        kind: ChartKind::Scatter,
        title: "GDP Variation During Recession Years".to_string(),
        x_label: "Year",
        y_label: "GDP",
        y2_label: None,
        color: PLUM,
        categories: tables.gdp_by_year.iter().map(|&(y, _)| y.to_string()).collect(),
        values: tables.gdp_by_year.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let unemployment = ChartSpec {
        kind: ChartKind::Area,
        title: "Unemployment Rate During Recession Periods".to_string(),
        x_label: "Year",
        y_label: "Unemployment Rate (%)",
        y2_label: None,
        color: AMBER,
        categories: tables.unemployment_by_year.iter().map(|&(y, _)| y.to_string()).collect(),
        values: tables.unemployment_by_year.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    ReportView {
        heading: "Recession Period Statistics".to_string(),
        charts: vec![vehicle, monthly, gdp, unemployment],
    }
}

fn yearly_view(tables: &YearlyTables) -> ReportView {
    let year = tables.year;

    let trend = ChartSpec {
        kind: ChartKind::Line,
        title: format!("Monthly Sales Trend for {year}"),
        x_label: "Month",
        y_label: "Automobile Sales",
        y2_label: None,
        color: STEEL_BLUE,
        categories: tables.sales_by_month.iter().map(|&(m, _)| m.to_string()).collect(),
        values: tables.sales_by_month.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let distribution = ChartSpec {
        kind: ChartKind::Proportion,
        title: format!("Vehicle Type Sales Distribution - {year}"),
        x_label: "Vehicle Type",
        y_label: "Share of Sales",
        y2_label: None,
        color: STEEL_BLUE,
        categories: tables.sales_by_vehicle_type.iter().map(|(k, _)| k.clone()).collect(),
        values: tables.sales_by_vehicle_type.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let ad_spend = ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Quarterly Advertising Expenditure - {year}"),
        x_label: "Quarter",
        y_label: "Expenditure ($)",
        y2_label: None,
        color: PLUM,
        categories: tables.ad_spend_by_quarter.iter().map(|&(q, _)| q.to_string()).collect(),
        values: tables.ad_spend_by_quarter.iter().map(|&(_, v)| v).collect(),
        secondary: Vec::new(),
    };

    let confidence = dual_axis_spec(year, &tables.sales_vs_confidence);

    ReportView {
        heading: format!("Yearly Statistics - {year}"),
        charts: vec![trend, distribution, ad_spend, confidence],
    }
}

fn dual_axis_spec(year: i32, paired: &[MonthlyPaired]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::DualAxisLine,
        title: format!("Sales vs Consumer Confidence - {year}"),
        x_label: "Month",
        y_label: "Sales Volume",
        y2_label: Some("Consumer Confidence"),
        color: AMBER,
        categories: paired.iter().map(|p| p.month.to_string()).collect(),
        values: paired.iter().map(|p| p.total_sales).collect(),
        secondary: paired.iter().map(|p| p.mean_confidence).collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::agg::{recession_report, yearly_report, YearlyReport};
    use crate::domain::{Month, SalesRecord};
    use chrono::NaiveDate;

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
    fn yearly_view_has_fixed_kinds_and_titles() {
        let records = vec![
            rec(2019, Month::Jan, false, "Sedan", 100.0),
            rec(2019, Month::Feb, false, "SUV", 200.0),
        ];
        let YearlyReport::Tables(tables) = yearly_report(&records, 2019) else {
            panic!("expected tables");
        };
        let DashView::Report(view) = build_view(&ReportOutput::Yearly(tables)) else {
            panic!("expected report view");
        };

        assert_eq!(view.heading, "Yearly Statistics - 2019");
        assert_eq!(view.charts.len(), 4);
        let kinds: Vec<ChartKind> = view.charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Line,
                ChartKind::Proportion,
                ChartKind::Bar,
                ChartKind::DualAxisLine
            ]
        );
        assert!(view.charts[0].title.contains("2019"));
        let dual = &view.charts[3];
        assert_eq!(dual.values.len(), dual.secondary.len());
        assert_eq!(dual.categories, vec!["Jan", "Feb"]);
    }

    #[test]
    fn recession_view_has_fixed_kinds() {
        let records = vec![
            rec(2008, Month::Jan, true, "Sedan", 100.0),
            rec(2009, Month::Feb, true, "SUV", 200.0),
        ];
        let tables = recession_report(&records);
        let DashView::Report(view) = build_view(&ReportOutput::Recession(tables)) else {
            panic!("expected report view");
        };

        assert_eq!(view.heading, "Recession Period Statistics");
        let kinds: Vec<ChartKind> = view.charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Bar,
                ChartKind::Line,
                ChartKind::Scatter,
                ChartKind::Area
            ]
        );
    }

    #[test]
    fn no_year_data_renders_message_referencing_the_year() {
        let view = build_view(&ReportOutput::NoYearData { year: 2042 });
        let DashView::Empty { message, .. } = view else {
            panic!("expected empty view");
        };
        assert!(message.contains("2042"));
    }

    #[test]
    fn empty_recession_tables_render_no_data_view() {
        let tables = recession_report(&[rec(2019, Month::Jan, false, "Sedan", 1.0)]);
        let view = build_view(&ReportOutput::Recession(tables));
        assert!(matches!(view, DashView::Empty { .. }));
    }
}
