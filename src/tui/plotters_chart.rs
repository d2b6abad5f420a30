//! Plotters-powered chart panel widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - one widget covers line, scatter, area and dual-axis panels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//!
//! The x axis is categorical: category `i` of `n` is plotted at `i + 0.5` on a
//! `0..n` axis, and the tick formatter maps positions back to category labels.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::charts::{ChartKind, ChartSpec, STEEL_BLUE};

/// A render-only panel over a precomputed [`ChartSpec`].
///
/// All series and labels are computed outside the render call; `render()` only
/// draws. `Bar` and `Proportion` specs are drawn by dedicated Ratatui widgets
/// in the parent module, not here.
pub struct PanelChart<'a> {
    pub spec: &'a ChartSpec,
}

impl Widget for PanelChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.spec.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No data for this panel.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.spec.values.len();
        let x0 = 0.0_f64;
        let x1 = n as f64;
        let Some((y0, y1)) = padded_bounds(&self.spec.values) else {
            return;
        };

        let dual = self.spec.kind == ChartKind::DualAxisLine;
        let secondary_bounds = if dual {
            match padded_bounds(&self.spec.secondary) {
                Some(b) => Some(b),
                None => return,
            }
        } else {
            None
        };

        let color = rgb(self.spec.color);
        let labels = &self.spec.categories;
        let fmt_x = move |v: &f64| -> String {
            let i = v.floor();
            if i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        };

        // Plot each category value at the center of its x slot.
        let points = self
            .spec
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 + 0.5, v));

        let widget = widget_fn(move |root| {
            let mut builder = ChartBuilder::on(&root);
            builder
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3);

            if let Some((s0, s1)) = secondary_bounds {
                builder.set_label_area_size(LabelAreaPosition::Right, 6);

                let mut chart = builder
                    .build_cartesian_2d(x0..x1, y0..y1)?
                    .set_secondary_coord(x0..x1, s0..s1);

                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .disable_y_mesh()
                    .x_desc(self.spec.x_label)
                    .y_desc(self.spec.y_label)
                    .x_labels(n.min(6))
                    .y_labels(5)
                    .x_label_formatter(&fmt_x)
                    .y_label_formatter(&|v| format!("{v:.1}"))
                    .label_style(("sans-serif", 10).into_font().color(&WHITE))
                    .axis_style(&WHITE)
                    .bold_line_style(&WHITE)
                    .draw()?;

                chart
                    .configure_secondary_axes()
                    .y_desc(self.spec.y2_label.unwrap_or(""))
                    .y_labels(5)
                    .y_label_formatter(&|v| format!("{v:.1}"))
                    .label_style(("sans-serif", 10).into_font().color(&WHITE))
                    .axis_style(&WHITE)
                    .draw()?;

                // Primary series in the base palette color, secondary in the
                // spec's accent color.
                let primary = rgb(STEEL_BLUE);
                chart.draw_series(LineSeries::new(points.clone(), &primary))?;
                chart.draw_series(points.clone().map(|(x, y)| Pixel::new((x, y), primary)))?;

                let secondary = self
                    .spec
                    .secondary
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as f64 + 0.5, v));
                chart.draw_secondary_series(LineSeries::new(secondary.clone(), &color))?;
                chart.draw_secondary_series(secondary.clone().map(|(x, y)| Pixel::new((x, y), color)))?;

                return Ok(());
            }

            let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. Mesh lines are disabled to reduce visual
            // clutter in low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.spec.x_label)
                .y_desc(self.spec.y_label)
                .x_labels(n.min(6))
                .y_labels(5)
                .x_label_formatter(&fmt_x)
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Markers are plain `Pixel`s. The underlying backend currently maps
            // `Circle` radii incorrectly (pixel radius -> normalized canvas
            // units), producing huge circles.
            match self.spec.kind {
                ChartKind::Line => {
                    chart.draw_series(LineSeries::new(points.clone(), &color))?;
                    chart.draw_series(points.clone().map(|(x, y)| Pixel::new((x, y), color)))?;
                }
                ChartKind::Scatter => {
                    chart.draw_series(points.clone().map(|(x, y)| Pixel::new((x, y), color)))?;
                }
                ChartKind::Area => {
                    chart.draw_series(
                        AreaSeries::new(points.clone(), y0, color.mix(0.4)).border_style(&color),
                    )?;
                    chart.draw_series(points.clone().map(|(x, y)| Pixel::new((x, y), color)))?;
                }
                // Bar and Proportion panels are rendered by Ratatui widgets in
                // the parent module; DualAxisLine is handled above.
                ChartKind::Bar | ChartKind::Proportion | ChartKind::DualAxisLine => {}
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Finite, padded y bounds for a series. `None` when the series cannot be
/// plotted (empty or non-finite values).
fn padded_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max <= min {
        // Flat series still gets a visible band.
        return Some((min - 0.5, min + 0.5));
    }
    let pad = ((max - min).abs() * 0.05).max(1e-12);
    Some((min - pad, max + pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_padded_and_ordered() {
        let (lo, hi) = padded_bounds(&[2.0, 10.0]).unwrap();
        assert!(lo < 2.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn flat_series_gets_a_visible_band() {
        let (lo, hi) = padded_bounds(&[3.0, 3.0]).unwrap();
        assert!(lo < 3.0 && hi > 3.0);
    }

    #[test]
    fn non_finite_values_cannot_be_plotted() {
        assert!(padded_bounds(&[1.0, f64::NAN]).is_none());
        assert!(padded_bounds(&[]).is_none());
    }
}
