//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ReportMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autodash", version, about = "Automobile Sales Reporting Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (the default when no subcommand is given).
    Tui(ReportArgs),
    /// Print the derived report tables as text, with optional plot and exports.
    ///
    /// This is the headless counterpart of the TUI: same pipeline, same
    /// tables, rendered as terminal text instead of widgets.
    Report(ReportArgs),
}

/// Common options for both front-ends.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Path to the historical sales CSV.
    #[arg(short = 'd', long, default_value = "data/historical_automobile_sales.csv")]
    pub data: PathBuf,

    /// Use a built-in synthetic dataset instead of reading a CSV.
    #[arg(long)]
    pub demo: bool,

    /// Seed for the synthetic dataset (deterministic per seed).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Report mode.
    #[arg(short = 'm', long, value_enum, default_value_t = ReportMode::Yearly)]
    pub mode: ReportMode,

    /// Target year for yearly mode. Defaults to 2020 when present in the
    /// dataset, else the latest available year.
    #[arg(short = 'y', long)]
    pub year: Option<i32>,

    /// Render an ASCII plot under the tables (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the derived tables to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the derived tables to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
