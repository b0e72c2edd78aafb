//! Visualization module for fromagerie.
//!
//! Every calculator report converts into a [`Chart`]: named line series,
//! vertical markers and an optional shaded band. Renderers consume the
//! chart, never the report:
//! - [`ascii`]: character-grid plot for the CLI
//! - the `fromagerie-tui` binary: ratatui `Chart` widget (feature `tui`)
//!
//! # Example
//!
//! ```rust
//! use fromagerie::models::{seasonal_demand, ModelReport};
//! use fromagerie::visualization::Chart;
//!
//! let chart = Chart::from(&ModelReport::Seasonal(seasonal_demand()));
//! assert_eq!(chart.series[0].points.len(), 12);
//! ```

pub mod ascii;

use serde::{Deserialize, Serialize};

use crate::models::{EoqReport, ModelReport, ProductionReport, QueueReport, SeasonalSeries};
use crate::models::production::BoundaryLine;

/// A named polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label.
    pub name: String,
    /// `(x, y)` points in drawing order.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Create a new series.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// A dashed vertical line at `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Legend label.
    pub label: String,
    /// Position on the x axis.
    pub x: f64,
}

/// Shaded band between `y = 0` and an upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Legend label.
    pub name: String,
    /// `(x, upper)` samples.
    pub bands: Vec<(f64, f64)>,
}

/// Renderer-independent chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Lines.
    pub series: Vec<Series>,
    /// Vertical markers.
    pub markers: Vec<Marker>,
    /// Optional shaded region.
    pub fill: Option<Fill>,
}

impl Chart {
    /// Create an empty chart.
    #[must_use]
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            markers: Vec::new(),
            fill: None,
        }
    }

    /// Add a series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Add a marker.
    #[must_use]
    pub fn with_marker(mut self, label: impl Into<String>, x: f64) -> Self {
        self.markers.push(Marker {
            label: label.into(),
            x,
        });
        self
    }

    /// Set the shaded region.
    #[must_use]
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Finite x extent over series, markers and fill.
    #[must_use]
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .chain(self.markers.iter().map(|m| m.x))
            .chain(self.fill.iter().flat_map(|f| f.bands.iter().map(|b| b.0)));
        finite_extent(xs)
    }

    /// Finite y extent over series and fill, always including zero.
    #[must_use]
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .chain(self.fill.iter().flat_map(|f| f.bands.iter().map(|b| b.1)));
        finite_extent(ys).map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)))
    }
}

fn finite_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

impl From<&ProductionReport> for Chart {
    fn from(report: &ProductionReport) -> Self {
        let region = &report.region;
        let mut chart = Self::new("Feasible Region", "Cheese A", "Cheese B");

        for (i, (line, row)) in region
            .boundaries
            .iter()
            .zip(&report.request.constraints)
            .enumerate()
        {
            let name = if row.label.is_empty() {
                format!("Constraint {}", i + 1)
            } else {
                format!("{} limit", row.label)
            };
            let points = match *line {
                BoundaryLine::Sloped { .. } => {
                    region.xs.iter().map(|&x| (x, line.value_at(x))).collect()
                }
                BoundaryLine::Vertical { at, .. } => {
                    let top = region.bands.iter().map(|b| b.upper).fold(0.0, f64::max);
                    vec![(at, 0.0), (at, top)]
                }
            };
            chart = chart.with_series(Series::new(name, points));
        }

        chart
            .with_fill(Fill {
                name: "Feasible".to_string(),
                bands: region.bands.iter().map(|b| (b.x, b.upper)).collect(),
            })
            .with_marker("Optimum", report.plan.x1)
    }
}

impl From<&EoqReport> for Chart {
    fn from(report: &EoqReport) -> Self {
        let total = report.curve.iter().map(|p| (p.quantity, p.total)).collect();
        let ordering = report.curve.iter().map(|p| (p.quantity, p.ordering)).collect();
        let holding = report.curve.iter().map(|p| (p.quantity, p.holding)).collect();

        Self::new("Total Cost vs Order Quantity", "Order quantity (Q)", "Total cost")
            .with_series(Series::new("Total cost", total))
            .with_series(Series::new("Ordering cost", ordering))
            .with_series(Series::new("Holding cost", holding))
            .with_marker("EOQ", report.eoq)
    }
}

impl From<&QueueReport> for Chart {
    fn from(report: &QueueReport) -> Self {
        Self::new("Utilization vs Customers in System", "Utilization (ρ)", "Number in system (L)")
            .with_series(Series::new("L(ρ)", report.reference_curve.clone()))
            .with_marker(format!("ρ = {:.2}", report.utilization), report.utilization)
    }
}

impl From<&SeasonalSeries> for Chart {
    fn from(series: &SeasonalSeries) -> Self {
        let points = series
            .points
            .iter()
            .map(|p| (f64::from(p.month), p.demand))
            .collect();
        Self::new("Seasonal Demand Forecast", "Month", "Demand (kg)")
            .with_series(Series::new("Demand", points))
    }
}

impl From<&ModelReport> for Chart {
    fn from(report: &ModelReport) -> Self {
        match report {
            ModelReport::Production(r) => r.into(),
            ModelReport::Inventory(r) => r.into(),
            ModelReport::Queueing(r) => r.into(),
            ModelReport::Seasonal(r) => r.into(),
        }
    }
}
