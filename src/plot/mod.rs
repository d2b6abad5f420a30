//! Terminal plotting.

mod ascii;

pub use ascii::render_line_plot;
