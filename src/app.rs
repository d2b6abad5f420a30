//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset (CSV or synthetic demo)
//! - runs the aggregation pipeline
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ReportArgs};
use crate::domain::DashConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `autodash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `autodash` and `autodash --demo` to behave like `autodash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // keeping the bare invocation interactive.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

pub fn dash_config_from_args(args: &ReportArgs) -> DashConfig {
    DashConfig {
        csv_path: args.data.clone(),
        demo: args.demo,
        demo_seed: args.seed,
        mode: args.mode,
        year: args.year,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args);
    let dataset = pipeline::load_dataset(&config)?;
    let year = pipeline::resolve_year(&dataset, config.year);
    let run = pipeline::run_report(&dataset, config.mode, year);

    println!("{}", crate::report::format_report(&dataset, &run.output));

    if config.plot {
        if let Some(plot) =
            crate::report::primary_plot(&run.output, config.plot_width, config.plot_height)
        {
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_tables_csv(path, &run.output)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_tables_json(path, &run.output)?;
    }

    Ok(())
}

/// Rewrite argv so `autodash` defaults to `autodash tui`.
///
/// Rules:
/// - `autodash`                    -> `autodash tui`
/// - `autodash --demo ...`         -> `autodash tui --demo ...`
/// - `autodash --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_tui() {
        assert_eq!(rewrite_args(args(&["autodash"])), args(&["autodash", "tui"]));
    }

    #[test]
    fn leading_flag_is_treated_as_tui_flags() {
        assert_eq!(
            rewrite_args(args(&["autodash", "--demo"])),
            args(&["autodash", "tui", "--demo"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(
            rewrite_args(args(&["autodash", "report", "-y", "2019"])),
            args(&["autodash", "report", "-y", "2019"])
        );
        assert_eq!(rewrite_args(args(&["autodash", "--help"])), args(&["autodash", "--help"]));
    }
}
