//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - category values: `o`
//! - connecting segments: `-` line
//!
//! The x axis is categorical (months, quarters, years): category `i` of `n`
//! lands at column `i / (n - 1) * (width - 1)`.

/// Render a connected line plot over an ordered categorical series.
pub fn render_line_plot(labels: &[String], values: &[f64], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(values).unwrap_or_else(|| {
        let v = values.first().copied().unwrap_or(0.0);
        (v - 0.5, v + 0.5)
    });
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw segments first so markers can overlay.
    let mut prev = None;
    for (i, &v) in values.iter().enumerate() {
        let x = map_x(i, values.len(), width);
        let y = map_y(v, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        }
        prev = Some((x, y));
    }
    for (i, &v) in values.iter().enumerate() {
        let x = map_x(i, values.len(), width);
        let y = map_y(v, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    let first = labels.first().map(String::as_str).unwrap_or("-");
    let last = labels.last().map(String::as_str).unwrap_or("-");
    out.push_str(&format!("Plot: {first}..{last} | y=[{y_min:.2}, {y_max:.2}]\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &v in values {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return width / 2;
    }
    let u = (i as f64 / (n as f64 - 1.0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_line_plot(&labels(&["Jan", "Feb"]), &[100.0, 110.0], 10, 5);
        let expected = concat!(
            "Plot: Jan..Feb | y=[99.50, 110.50]\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_series_stays_inside_the_grid() {
        let txt = render_line_plot(&labels(&["Q1", "Q2", "Q3"]), &[5.0, 5.0, 5.0], 12, 5);
        assert_eq!(txt.lines().count(), 6);
        assert_eq!(txt.matches('o').count(), 3);
    }

    #[test]
    fn single_point_lands_mid_width() {
        let txt = render_line_plot(&labels(&["Jan"]), &[3.0], 11, 5);
        let marker_line = txt.lines().find(|l| l.contains('o')).unwrap();
        assert_eq!(marker_line.find('o'), Some(5));
    }
}
