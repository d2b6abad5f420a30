//! `auto-dash` library crate.
//!
//! The binary (`autodash`) is a thin wrapper around this library so that:
//!
//! - core logic (loading + aggregation) is testable without spawning processes
//! - modules are reusable (e.g., future web front-end, batch exports, etc.)
//! - code stays easy to navigate as the project grows

pub mod agg;
pub mod app;
pub mod charts;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
