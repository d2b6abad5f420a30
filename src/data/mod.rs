//! Built-in data sources.

pub mod sample;
