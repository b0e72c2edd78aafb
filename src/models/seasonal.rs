//! Calculator 4: Seasonal demand.
//!
//! ```text
//! demand(m) = 200 + 50·sin(2π·m/12)
//! ```
//!
//! Illustrative only: fixed constants, no inputs, no failure modes.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Mean monthly demand.
pub const BASE_DEMAND: f64 = 200.0;

/// Seasonal swing around the mean.
pub const AMPLITUDE: f64 = 50.0;

/// Months per cycle.
pub const PERIOD_MONTHS: u32 = 12;

/// Demand in one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDemand {
    /// Month number, 1-based.
    pub month: u32,
    /// Demand in that month.
    pub demand: f64,
}

/// Twelve months of demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalSeries {
    /// Months 1 through 12.
    pub points: Vec<MonthlyDemand>,
}

impl SeasonalSeries {
    /// Month with the highest demand.
    #[must_use]
    pub fn peak(&self) -> Option<MonthlyDemand> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.demand.partial_cmp(&b.demand).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Month with the lowest demand.
    #[must_use]
    pub fn trough(&self) -> Option<MonthlyDemand> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.demand.partial_cmp(&b.demand).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Sum over the year.
    #[must_use]
    pub fn annual_total(&self) -> f64 {
        self.points.iter().map(|p| p.demand).sum()
    }

    /// Mean monthly demand.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            0.0
        } else {
            self.annual_total() / self.points.len() as f64
        }
    }
}

/// Demand for any month number; periodic with period 12.
#[must_use]
pub fn demand_for_month(month: i64) -> f64 {
    let phase = (month.rem_euclid(i64::from(PERIOD_MONTHS))) as f64 / f64::from(PERIOD_MONTHS);
    AMPLITUDE.mul_add((TAU * phase).sin(), BASE_DEMAND)
}

/// The fixed 12-month series.
#[must_use]
pub fn seasonal_demand() -> SeasonalSeries {
    SeasonalSeries {
        points: (1..=PERIOD_MONTHS)
            .map(|month| MonthlyDemand {
                month,
                demand: demand_for_month(i64::from(month)),
            })
            .collect(),
    }
}
