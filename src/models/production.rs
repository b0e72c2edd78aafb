//! Calculator 1: Production Optimizer
//!
//! Two-product production mix as a linear program.
//!
//! # Governing Equation
//!
//! ```text
//! maximize   a1·x1 + a2·x2
//! subject to r1·x1 + r2·x2 ≤ limit     (one row per resource)
//!            x1, x2 ≥ 0
//! ```
//!
//! The program is solved in minimization form (`min -a·x`) by corner-point
//! enumeration: with two variables every bounded optimum sits on a vertex
//! of the feasible polygon, and every vertex is the intersection of two of
//! the constraint lines or axes.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, LpFailure, OpsError, OpsResult};

/// Relative tolerance for feasibility and ray tests, scaled by the
/// magnitude of the terms being compared.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Fallback right edge of the plotted x range.
pub const DEFAULT_X_MAX: f64 = 100.0;

/// Headroom added past the largest x-intercept.
pub const X_RANGE_HEADROOM: f64 = 1.2;

/// Default number of samples across the plotted x range.
pub const DEFAULT_REGION_SAMPLES: usize = 400;

/// One resource constraint `x1·x1 + x2·x2 ≤ limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRow {
    /// Display label (e.g. "Raw milk").
    #[serde(default)]
    pub label: String,
    /// Coefficient on product A.
    pub x1: f64,
    /// Coefficient on product B.
    pub x2: f64,
    /// Available amount of the resource.
    pub limit: f64,
}

impl ConstraintRow {
    /// Create a new unlabelled row.
    #[must_use]
    pub fn new(x1: f64, x2: f64, limit: f64) -> Self {
        Self {
            label: String::new(),
            x1,
            x2,
            limit,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Left-hand side at a point.
    #[must_use]
    pub fn lhs(&self, x1: f64, x2: f64) -> f64 {
        self.x1 * x1 + self.x2 * x2
    }

    /// Magnitude of the terms in `lhs - limit` at a point.
    #[must_use]
    pub fn scale_at(&self, x1: f64, x2: f64) -> f64 {
        (self.x1 * x1).abs() + (self.x2 * x2).abs() + self.limit.abs()
    }

    /// Whether the row holds at a point (within tolerance).
    #[must_use]
    pub fn is_satisfied(&self, x1: f64, x2: f64) -> bool {
        self.lhs(x1, x2) - self.limit <= FEASIBILITY_TOLERANCE * self.scale_at(x1, x2)
    }
}

/// Production LP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// Profit per unit of product A (a1).
    pub profit_a: f64,
    /// Profit per unit of product B (a2).
    pub profit_b: f64,
    /// Resource constraints.
    pub constraints: Vec<ConstraintRow>,
}

impl Default for ProductionRequest {
    fn default() -> Self {
        Self {
            profit_a: 40.0,
            profit_b: 30.0,
            constraints: vec![
                ConstraintRow::new(2.0, 1.0, 100.0).labelled("Raw milk"),
                ConstraintRow::new(1.0, 2.0, 80.0).labelled("Labour hours"),
            ],
        }
    }
}

impl ProductionRequest {
    /// Build the two-row request `(a1, a2, b1, b2, limit1, c1, c2, limit2)`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn two_rows(
        a1: f64,
        a2: f64,
        b1: f64,
        b2: f64,
        limit1: f64,
        c1: f64,
        c2: f64,
        limit2: f64,
    ) -> Self {
        Self {
            profit_a: a1,
            profit_b: a2,
            constraints: vec![
                ConstraintRow::new(b1, b2, limit1),
                ConstraintRow::new(c1, c2, limit2),
            ],
        }
    }

    /// Objective value at a point.
    #[must_use]
    pub fn objective(&self, x1: f64, x2: f64) -> f64 {
        self.profit_a * x1 + self.profit_b * x2
    }

    /// Reject non-finite coefficients and rows that cannot form a line.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-finite values, `DegenerateConstraint`
    /// for a row with both coefficients zero.
    pub fn validate(&self) -> OpsResult<()> {
        require_finite("profit A", self.profit_a)?;
        require_finite("profit B", self.profit_b)?;
        for (i, row) in self.constraints.iter().enumerate() {
            let index = i + 1;
            require_finite(&format!("constraint {index} x1"), row.x1)?;
            require_finite(&format!("constraint {index} x2"), row.x2)?;
            require_finite(&format!("constraint {index} limit"), row.limit)?;
            if row.x1 == 0.0 && row.x2 == 0.0 {
                return Err(OpsError::DegenerateConstraint { index });
            }
        }
        Ok(())
    }
}

/// Usage of one constraint at the optimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintUsage {
    /// Row label.
    pub label: String,
    /// Resource consumed at the optimum.
    pub used: f64,
    /// Resource available.
    pub limit: f64,
    /// Unused amount (`limit - used`, never negative).
    pub slack: f64,
    /// Whether the row holds with equality.
    pub binding: bool,
}

/// Optimal production mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// Units of product A.
    pub x1: f64,
    /// Units of product B.
    pub x2: f64,
    /// Maximum profit.
    pub max_value: f64,
    /// Per-row usage at the optimum.
    pub usage: Vec<ConstraintUsage>,
}

/// Drawable boundary of one constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BoundaryLine {
    /// `x2 = slope·x1 + intercept`.
    Sloped {
        /// Slope.
        slope: f64,
        /// Value at `x1 = 0`.
        intercept: f64,
    },
    /// `x1 = at`; the row has no x2 term.
    Vertical {
        /// Position on the x1 axis.
        at: f64,
        /// Feasible side lies at `x1 ≤ at`.
        feasible_left: bool,
    },
}

impl BoundaryLine {
    /// Derive the boundary of a row.
    ///
    /// # Errors
    ///
    /// `DegenerateConstraint` when the row has no variable terms.
    pub fn from_row(row: &ConstraintRow, index: usize) -> OpsResult<Self> {
        // Sloped unless x2 vanishes next to x1 at machine precision.
        if row.x2.abs() > f64::EPSILON * row.x1.abs() {
            return Ok(Self::Sloped {
                slope: -row.x1 / row.x2,
                intercept: row.limit / row.x2,
            });
        }
        if row.x1 != 0.0 {
            return Ok(Self::Vertical {
                at: row.limit / row.x1,
                feasible_left: row.x1 > 0.0,
            });
        }
        Err(OpsError::DegenerateConstraint { index })
    }

    /// Boundary height at `x`; vertical lines are unbounded on their
    /// feasible side and absent on the other.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        match *self {
            Self::Sloped { slope, intercept } => slope.mul_add(x, intercept),
            Self::Vertical { at, feasible_left } => {
                if (x <= at) == feasible_left {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
        }
    }
}

/// One x sample of the shaded region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBand {
    /// Product A quantity.
    pub x: f64,
    /// Upper edge of the band (lowest boundary value).
    pub upper: f64,
}

/// Constraint boundaries and the shaded intersection band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibleRegion {
    /// Right edge of the plotted range.
    pub x_max: f64,
    /// One boundary per constraint row, in row order.
    pub boundaries: Vec<BoundaryLine>,
    /// Sample xs over `[0, x_max]`.
    pub xs: Vec<f64>,
    /// Samples where every boundary value is positive.
    pub bands: Vec<RegionBand>,
}

/// Plan plus the region to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionReport {
    /// The request that produced this report.
    pub request: ProductionRequest,
    /// Optimal plan.
    pub plan: ProductionPlan,
    /// Region to draw.
    pub region: FeasibleRegion,
}

/// Solve the production LP.
///
/// # Errors
///
/// `InfeasibleOrUnbounded` when no bounded optimum exists, plus the
/// validation errors of [`ProductionRequest::validate`].
pub fn optimize_production(request: &ProductionRequest) -> OpsResult<ProductionPlan> {
    request.validate()?;

    // Minimization form.
    let cost = [-request.profit_a, -request.profit_b];

    let vertices = feasible_vertices(&request.constraints);
    if vertices.is_empty() {
        tracing::debug!(rows = request.constraints.len(), "production LP infeasible");
        return Err(OpsError::InfeasibleOrUnbounded(LpFailure::Infeasible));
    }

    if recession_rays(&request.constraints).iter().any(|d| {
        let gain = cost[0] * d[0] + cost[1] * d[1];
        gain < -FEASIBILITY_TOLERANCE * ((cost[0] * d[0]).abs() + (cost[1] * d[1]).abs())
    }) {
        tracing::debug!("production LP unbounded");
        return Err(OpsError::InfeasibleOrUnbounded(LpFailure::Unbounded));
    }

    let mut best = vertices[0];
    let mut best_cost = cost[0] * best[0] + cost[1] * best[1];
    for v in &vertices[1..] {
        let c = cost[0] * v[0] + cost[1] * v[1];
        if c < best_cost - FEASIBILITY_TOLERANCE * (c.abs() + best_cost.abs()) {
            best = *v;
            best_cost = c;
        }
    }

    let (x1, x2) = (best[0], best[1]);
    let usage = request
        .constraints
        .iter()
        .map(|row| {
            let used = row.lhs(x1, x2);
            let slack = (row.limit - used).max(0.0);
            ConstraintUsage {
                label: row.label.clone(),
                used,
                limit: row.limit,
                slack,
                binding: slack <= FEASIBILITY_TOLERANCE * row.scale_at(x1, x2),
            }
        })
        .collect();

    let plan = ProductionPlan {
        x1,
        x2,
        max_value: -best_cost + 0.0,
        usage,
    };
    tracing::debug!(x1 = plan.x1, x2 = plan.x2, profit = plan.max_value, "production LP solved");
    Ok(plan)
}

/// Solve the LP and derive the region to plot.
///
/// # Errors
///
/// Same as [`optimize_production`]; nothing is plotted on failure.
pub fn production_report(request: &ProductionRequest, samples: usize) -> OpsResult<ProductionReport> {
    let plan = optimize_production(request)?;
    let region = feasible_region(request, &plan, samples)?;
    Ok(ProductionReport {
        request: request.clone(),
        plan,
        region,
    })
}

/// Derive boundary lines and the shaded band.
///
/// # Errors
///
/// `DegenerateConstraint` when a row has no variable terms.
pub fn feasible_region(
    request: &ProductionRequest,
    plan: &ProductionPlan,
    samples: usize,
) -> OpsResult<FeasibleRegion> {
    let boundaries = request
        .constraints
        .iter()
        .enumerate()
        .map(|(i, row)| BoundaryLine::from_row(row, i + 1))
        .collect::<OpsResult<Vec<_>>>()?;

    let x_max = plot_x_max(&request.constraints, plan.x1);
    let samples = samples.max(2);
    let step = x_max / (samples - 1) as f64;
    let xs: Vec<f64> = (0..samples).map(|i| i as f64 * step).collect();

    // Height used for a band that no sloped boundary caps.
    let y_cap = boundaries
        .iter()
        .filter_map(|b| match b {
            BoundaryLine::Sloped { intercept, .. } if *intercept > 0.0 => Some(*intercept),
            _ => None,
        })
        .fold(plan.x2.max(1.0), f64::max)
        * X_RANGE_HEADROOM;

    let bands = xs
        .iter()
        .filter_map(|&x| {
            let lowest = boundaries
                .iter()
                .map(|b| b.value_at(x))
                .fold(f64::INFINITY, f64::min);
            (lowest > 0.0).then(|| RegionBand {
                x,
                upper: lowest.min(y_cap),
            })
        })
        .collect();

    Ok(FeasibleRegion {
        x_max,
        boundaries,
        xs,
        bands,
    })
}

/// Largest positive x-intercept with headroom, or [`DEFAULT_X_MAX`].
fn plot_x_max(rows: &[ConstraintRow], optimum_x1: f64) -> f64 {
    let widest = rows
        .iter()
        .filter(|r| r.x1 > 0.0 && r.limit > 0.0)
        .map(|r| r.limit / r.x1)
        .fold(optimum_x1, f64::max);

    if widest.is_finite() && widest > 0.0 {
        widest * X_RANGE_HEADROOM
    } else {
        DEFAULT_X_MAX
    }
}

/// Lines `a·x1 + b·x2 = rhs` bounding the polygon: both axes, then the rows.
fn boundary_equations(rows: &[ConstraintRow]) -> Vec<[f64; 3]> {
    let mut lines = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    lines.extend(rows.iter().map(|r| [r.x1, r.x2, r.limit]));
    lines
}

fn is_feasible(rows: &[ConstraintRow], p: [f64; 2]) -> bool {
    p[0] >= 0.0
        && p[1] >= 0.0
        && rows.iter().all(|r| r.is_satisfied(p[0], p[1]))
}

/// Feasible pairwise intersections, in enumeration order.
fn feasible_vertices(rows: &[ConstraintRow]) -> Vec<[f64; 2]> {
    let lines = boundary_equations(rows);
    let mut vertices = Vec::new();

    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            let det = a[0] * b[1] - b[0] * a[1];
            // Parallel up to rounding, whatever the coefficient magnitudes.
            if det == 0.0 || det.abs() <= f64::EPSILON * a[0].hypot(a[1]) * b[0].hypot(b[1]) {
                continue;
            }
            // Snap cancellation noise onto the axes.
            let x1 = snap_zero(a[2] * b[1], b[2] * a[1]) / det;
            let x2 = snap_zero(a[0] * b[2], b[0] * a[2]) / det;
            let p = [x1 + 0.0, x2 + 0.0];
            if is_feasible(rows, p) {
                vertices.push(p);
            }
        }
    }

    vertices
}

/// Extreme rays of `{d ≥ 0 : rows·d ≤ 0}`.
fn recession_rays(rows: &[ConstraintRow]) -> Vec<[f64; 2]> {
    let mut candidates = vec![[1.0, 0.0], [0.0, 1.0]];
    candidates.extend(
        rows.iter()
            .filter(|r| r.x1 * r.x2 < 0.0)
            .map(|r| [r.x2.abs(), r.x1.abs()]),
    );

    candidates
        .into_iter()
        .filter(|d| {
            rows.iter().all(|r| {
                let growth = r.x1 * d[0] + r.x2 * d[1];
                growth <= FEASIBILITY_TOLERANCE * ((r.x1 * d[0]).abs() + (r.x2 * d[1]).abs())
            })
        })
        .collect()
}

/// `lhs - rhs`, or zero when the two cancel within tolerance.
fn snap_zero(lhs: f64, rhs: f64) -> f64 {
    let difference = lhs - rhs;
    if difference.abs() <= FEASIBILITY_TOLERANCE * (lhs.abs() + rhs.abs()) {
        0.0
    } else {
        difference
    }
}
