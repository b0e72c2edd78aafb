//! Calculator 2: Economic Order Quantity
//!
//! # Governing Equation
//!
//! ```text
//! TC(Q) = (D/Q)·S + (Q/2)·H
//! EOQ   = √(2·D·S / H)
//!
//! Where:
//!   D = Annual demand (kg/year)
//!   S = Cost per order
//!   H = Holding cost per kg per year
//! ```
//!
//! At the EOQ the ordering and holding terms are equal.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, OpsError, OpsResult};

/// Lowest order quantity on the sampled cost curve.
pub const CURVE_FLOOR: f64 = 100.0;

/// Default number of samples on the cost curve.
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Days used to express the order cycle.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// EOQ request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryRequest {
    /// Annual demand D.
    pub annual_demand: f64,
    /// Cost per order S.
    pub order_cost: f64,
    /// Holding cost per unit per year H.
    pub holding_cost: f64,
}

impl Default for InventoryRequest {
    fn default() -> Self {
        Self {
            annual_demand: 12_000.0,
            order_cost: 50_000.0,
            holding_cost: 2_000.0,
        }
    }
}

impl InventoryRequest {
    /// Create a new request.
    #[must_use]
    pub const fn new(annual_demand: f64, order_cost: f64, holding_cost: f64) -> Self {
        Self {
            annual_demand,
            order_cost,
            holding_cost,
        }
    }

    /// Annual ordering cost `(D/Q)·S`.
    #[must_use]
    pub fn ordering_cost(&self, quantity: f64) -> f64 {
        self.annual_demand / quantity * self.order_cost
    }

    /// Annual holding cost `(Q/2)·H`.
    #[must_use]
    pub fn holding_cost_at(&self, quantity: f64) -> f64 {
        quantity / 2.0 * self.holding_cost
    }

    /// Total annual cost at an order quantity.
    #[must_use]
    pub fn total_cost(&self, quantity: f64) -> f64 {
        self.ordering_cost(quantity) + self.holding_cost_at(quantity)
    }
}

/// One sample of the cost curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostPoint {
    /// Order quantity Q.
    pub quantity: f64,
    /// Ordering component.
    pub ordering: f64,
    /// Holding component.
    pub holding: f64,
    /// Total cost.
    pub total: f64,
}

/// EOQ result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EoqReport {
    /// The request that produced this report.
    pub request: InventoryRequest,
    /// Economic order quantity.
    pub eoq: f64,
    /// Total annual cost at the EOQ.
    pub total_cost: f64,
    /// Annual ordering cost at the EOQ.
    pub annual_ordering_cost: f64,
    /// Annual holding cost at the EOQ.
    pub annual_holding_cost: f64,
    /// Orders placed per year (D/EOQ).
    pub orders_per_year: f64,
    /// Days between orders.
    pub cycle_days: f64,
    /// Sampled cost curve from the floor to 2·EOQ.
    pub curve: Vec<CostPoint>,
}

impl EoqReport {
    /// Cheapest sampled point.
    #[must_use]
    pub fn curve_minimum(&self) -> Option<&CostPoint> {
        self.curve
            .iter()
            .min_by(|a, b| a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// `√(2·D·S/H)` without validation.
#[must_use]
pub fn economic_order_quantity(annual_demand: f64, order_cost: f64, holding_cost: f64) -> f64 {
    (2.0 * annual_demand * order_cost / holding_cost).sqrt()
}

/// Compute the EOQ and its cost curve.
///
/// # Errors
///
/// `InvalidParameter` when D, S or H is not a finite value > 0, or when
/// the EOQ overflows or underflows.
pub fn compute_eoq(request: &InventoryRequest, curve_points: usize) -> OpsResult<EoqReport> {
    require_positive("annual demand", request.annual_demand)?;
    require_positive("order cost", request.order_cost)?;
    require_positive("holding cost", request.holding_cost)?;

    let eoq = economic_order_quantity(
        request.annual_demand,
        request.order_cost,
        request.holding_cost,
    );
    if !(eoq.is_finite() && eoq > 0.0) {
        return Err(OpsError::invalid_parameter(
            "economic order quantity",
            eoq,
            "must be a finite value > 0; inputs out of range",
        ));
    }
    let total_cost = request.total_cost(eoq);
    let orders_per_year = request.annual_demand / eoq;
    let curve = cost_curve(request, eoq, curve_points);

    let report = EoqReport {
        request: *request,
        eoq,
        total_cost,
        annual_ordering_cost: request.ordering_cost(eoq),
        annual_holding_cost: request.holding_cost_at(eoq),
        orders_per_year,
        cycle_days: DAYS_PER_YEAR / orders_per_year,
        curve,
    };
    tracing::debug!(eoq = report.eoq, total_cost = report.total_cost, "EOQ computed");
    Ok(report)
}

/// Sample `TC(Q)` evenly over `[floor, 2·EOQ]`.
///
/// The floor is [`CURVE_FLOOR`], lowered for small EOQs so it stays below
/// the upper end and never reaches zero.
fn cost_curve(request: &InventoryRequest, eoq: f64, points: usize) -> Vec<CostPoint> {
    let points = points.max(2);
    let upper = 2.0 * eoq;
    let floor = if upper > 2.0 * CURVE_FLOOR {
        CURVE_FLOOR
    } else {
        upper / points as f64
    };
    let step = (upper - floor) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let quantity = floor + i as f64 * step;
            let ordering = request.ordering_cost(quantity);
            let holding = request.holding_cost_at(quantity);
            CostPoint {
                quantity,
                ordering,
                holding,
                total: ordering + holding,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_eoq() {
        let report = compute_eoq(&InventoryRequest::default(), DEFAULT_CURVE_POINTS).expect("eoq");
        assert!((report.eoq - 600_000_f64.sqrt()).abs() < 1e-9);
        assert!((report.eoq - 774.60).abs() < 0.01);
    }

    #[test]
    fn test_costs_balance_at_eoq() {
        let report = compute_eoq(&InventoryRequest::default(), DEFAULT_CURVE_POINTS).expect("eoq");
        assert!((report.annual_ordering_cost - report.annual_holding_cost).abs() < 1e-6);
        assert!(
            (report.total_cost - report.annual_ordering_cost - report.annual_holding_cost).abs()
                < 1e-6
        );
    }

    #[test]
    fn test_order_frequency() {
        let report = compute_eoq(&InventoryRequest::default(), DEFAULT_CURVE_POINTS).expect("eoq");
        assert!((report.orders_per_year * report.eoq - 12_000.0).abs() < 1e-6);
        assert!((report.cycle_days - 365.0 / report.orders_per_year).abs() < 1e-9);
    }

    #[test]
    fn test_curve_range() {
        let report = compute_eoq(&InventoryRequest::default(), DEFAULT_CURVE_POINTS).expect("eoq");
        assert_eq!(report.curve.len(), DEFAULT_CURVE_POINTS);
        assert!((report.curve[0].quantity - CURVE_FLOOR).abs() < 1e-9);
        let last = report.curve.last().expect("last");
        assert!((last.quantity - 2.0 * report.eoq).abs() < 1e-6);
    }

    #[test]
    fn test_curve_minimum_matches_closed_form() {
        let report = compute_eoq(&InventoryRequest::default(), DEFAULT_CURVE_POINTS).expect("eoq");
        let min = report.curve_minimum().expect("min");
        assert!(min.total >= report.total_cost - 1e-6);
        assert!((min.total - report.total_cost) / report.total_cost < 1e-3);
        assert!((min.quantity - report.eoq).abs() < 2.0 * report.eoq / DEFAULT_CURVE_POINTS as f64);
    }

    #[test]
    fn test_small_eoq_floor_stays_positive() {
        // EOQ = √(2·10·1/1) ≈ 4.47, far below the 100-unit floor.
        let report = compute_eoq(&InventoryRequest::new(10.0, 1.0, 1.0), 50).expect("eoq");
        let first = report.curve[0].quantity;
        assert!(first > 0.0);
        assert!(first < report.eoq);
        assert!(report.curve.iter().all(|p| p.total.is_finite()));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        for request in [
            InventoryRequest::new(0.0, 50_000.0, 2_000.0),
            InventoryRequest::new(12_000.0, -1.0, 2_000.0),
            InventoryRequest::new(12_000.0, 50_000.0, 0.0),
            InventoryRequest::new(f64::NAN, 50_000.0, 2_000.0),
        ] {
            let err = compute_eoq(&request, DEFAULT_CURVE_POINTS).unwrap_err();
            assert!(matches!(err, OpsError::InvalidParameter { .. }), "{err}");
        }
    }

    #[test]
    fn test_rejects_overflowing_inputs() {
        // 2·D·S overflows to infinity before the square root.
        let err = compute_eoq(&InventoryRequest::new(1e200, 1e200, 1.0), 10).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter { .. }));
        assert!(err.to_string().contains("economic order quantity"));
    }

    #[test]
    fn test_rejects_underflowing_eoq() {
        let err = compute_eoq(&InventoryRequest::new(1e-200, 1e-200, 1e300), 10).unwrap_err();
        assert!(err.to_string().contains("economic order quantity"), "{err}");
    }

    #[test]
    fn test_error_names_parameter() {
        let err = compute_eoq(&InventoryRequest::new(12_000.0, 50_000.0, -3.0), 10).unwrap_err();
        assert!(err.to_string().contains("holding cost"));
    }
}
