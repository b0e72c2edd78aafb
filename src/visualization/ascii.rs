//! Character-grid chart renderer for terminal output.
//!
//! Layering, back to front: shaded fill, vertical markers, series. Points
//! outside the chart's finite bounds are skipped.

use std::fmt::Write as FmtWrite;

use super::Chart;

/// Glyphs assigned to series in order.
const SERIES_GLYPHS: [char; 4] = ['*', '+', 'o', '#'];
const FILL_GLYPH: char = '.';
const MARKER_GLYPH: char = '|';

/// Smallest drawable grid.
pub const MIN_WIDTH: usize = 10;
/// Smallest drawable grid.
pub const MIN_HEIGHT: usize = 4;

/// Plot area size in characters (axes and legend excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: 60,
            height: 16,
        }
    }
}

struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Grid {
    fn new(size: GridSize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; size.width]; size.height],
            width: size.width,
            height: size.height,
            x_range,
            y_range,
        }
    }

    fn column(&self, x: f64) -> Option<usize> {
        to_cell(x, self.x_range, self.width)
    }

    /// Row 0 is the top of the grid.
    fn row(&self, y: f64) -> Option<usize> {
        to_cell(y, self.y_range, self.height).map(|r| self.height - 1 - r)
    }

    fn set(&mut self, col: usize, row: usize, glyph: char) {
        self.cells[row][col] = glyph;
    }
}

fn to_cell(v: f64, (lo, hi): (f64, f64), cells: usize) -> Option<usize> {
    if !v.is_finite() || v < lo || v > hi {
        return None;
    }
    let span = hi - lo;
    if span <= 0.0 {
        return Some(0);
    }
    let scaled = ((v - lo) / span * (cells - 1) as f64).round();
    Some((scaled as usize).min(cells - 1))
}

/// Widen a degenerate range so every point maps somewhere.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Render a chart into a multi-line string.
#[must_use]
pub fn render(chart: &Chart, size: GridSize) -> String {
    let size = GridSize {
        width: size.width.max(MIN_WIDTH),
        height: size.height.max(MIN_HEIGHT),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);

    let (Some(x_range), Some(y_range)) = (chart.x_bounds(), chart.y_bounds()) else {
        out.push_str("(no data)\n");
        return out;
    };
    let mut grid = Grid::new(size, padded(x_range), padded(y_range));

    if let Some(fill) = &chart.fill {
        for &(x, upper) in &fill.bands {
            let (Some(col), Some(top), Some(bottom)) =
                (grid.column(x), grid.row(upper.min(grid.y_range.1)), grid.row(0.0))
            else {
                continue;
            };
            for row in top..=bottom {
                grid.set(col, row, FILL_GLYPH);
            }
        }
    }

    for marker in &chart.markers {
        if let Some(col) = grid.column(marker.x) {
            for row in 0..grid.height {
                grid.set(col, row, MARKER_GLYPH);
            }
        }
    }

    for (series, glyph) in chart.series.iter().zip(SERIES_GLYPHS.iter().cycle()) {
        for &(x, y) in &series.points {
            if let (Some(col), Some(row)) = (grid.column(x), grid.row(y)) {
                grid.set(col, row, *glyph);
            }
        }
    }

    let y_top = format_tick(grid.y_range.1);
    let y_bottom = format_tick(grid.y_range.0);
    let gutter = y_top.len().max(y_bottom.len());

    for (i, row) in grid.cells.iter().enumerate() {
        let tick = if i == 0 {
            y_top.as_str()
        } else if i + 1 == grid.height {
            y_bottom.as_str()
        } else {
            ""
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{tick:>gutter$} │{}", line.trim_end());
    }

    let _ = writeln!(out, "{:>gutter$} └{}", "", "─".repeat(grid.width));
    let x_left = format_tick(grid.x_range.0);
    let x_right = format_tick(grid.x_range.1);
    let pad = grid.width.saturating_sub(x_left.len() + x_right.len());
    let _ = writeln!(out, "{:>gutter$}  {x_left}{}{x_right}", "", " ".repeat(pad));
    let _ = writeln!(out, "{:>gutter$}  x: {}   y: {}", "", chart.x_label, chart.y_label);

    let mut legend: Vec<String> = chart
        .series
        .iter()
        .zip(SERIES_GLYPHS.iter().cycle())
        .map(|(s, g)| format!("{g} {}", s.name))
        .collect();
    legend.extend(chart.markers.iter().map(|m| format!("{MARKER_GLYPH} {}", m.label)));
    if let Some(fill) = &chart.fill {
        legend.push(format!("{FILL_GLYPH} {}", fill.name));
    }
    if !legend.is_empty() {
        let _ = writeln!(out, "{:>gutter$}  {}", "", legend.join("   "));
    }

    out
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 10_000.0 {
        format!("{v:.3e}")
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
