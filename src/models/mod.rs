//! The four dashboard calculators.
//!
//! Each calculator is a pure function of its request. [`Model`] is the
//! menu choice: one variant per calculator carrying that calculator's
//! inputs, evaluated into the matching [`ModelReport`] variant.
//!
//! 1. [`production`] - two-product LP (corner-point enumeration)
//! 2. [`inventory`] - Economic Order Quantity
//! 3. [`queueing`] - M/M/1 steady state
//! 4. [`seasonal`] - fixed sinusoidal demand

pub mod inventory;
pub mod production;
pub mod queueing;
pub mod seasonal;

pub use inventory::{compute_eoq, EoqReport, InventoryRequest};
pub use production::{optimize_production, production_report, ProductionReport, ProductionRequest};
pub use queueing::{compute_queue, QueueReport, QueueRequest};
pub use seasonal::{seasonal_demand, SeasonalSeries};

use serde::{Deserialize, Serialize};

use crate::error::OpsResult;

/// Menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Production optimizer.
    #[default]
    Production,
    /// EOQ inventory model.
    Inventory,
    /// M/M/1 queue.
    Queueing,
    /// Seasonal demand.
    Seasonal,
}

impl ModelKind {
    /// Menu order.
    pub const ALL: [Self; 4] = [
        Self::Production,
        Self::Inventory,
        Self::Queueing,
        Self::Seasonal,
    ];

    /// Short menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Production => "Production Optimizer",
            Self::Inventory => "Inventory Model (EOQ)",
            Self::Queueing => "Queueing Model (M/M/1)",
            Self::Seasonal => "Seasonal Demand",
        }
    }

    /// CLI name.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Inventory => "inventory",
            Self::Queueing => "queue",
            Self::Seasonal => "seasonal",
        }
    }

    /// Parse a CLI name (a few aliases accepted).
    #[must_use]
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "production" | "lp" => Some(Self::Production),
            "inventory" | "eoq" => Some(Self::Inventory),
            "queue" | "queueing" | "mm1" => Some(Self::Queueing),
            "seasonal" | "demand" => Some(Self::Seasonal),
            _ => None,
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Production => 0,
            Self::Inventory => 1,
            Self::Queueing => 2,
            Self::Seasonal => 3,
        }
    }

    /// Next menu entry, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous menu entry, wrapping.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Sampling resolution for the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sampling {
    /// Samples across the production x range.
    pub region_samples: usize,
    /// Samples on the EOQ cost curve.
    pub eoq_curve_points: usize,
    /// Samples on the L(ρ) curve.
    pub queue_curve_points: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            region_samples: production::DEFAULT_REGION_SAMPLES,
            eoq_curve_points: inventory::DEFAULT_CURVE_POINTS,
            queue_curve_points: queueing::DEFAULT_CURVE_POINTS,
        }
    }
}

/// A menu choice with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum Model {
    /// Production LP.
    Production(ProductionRequest),
    /// EOQ.
    Inventory(InventoryRequest),
    /// M/M/1.
    Queueing(QueueRequest),
    /// Seasonal demand (no inputs).
    Seasonal,
}

impl Model {
    /// Which menu entry this is.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::Production(_) => ModelKind::Production,
            Self::Inventory(_) => ModelKind::Inventory,
            Self::Queueing(_) => ModelKind::Queueing,
            Self::Seasonal => ModelKind::Seasonal,
        }
    }

    /// Run the calculator.
    ///
    /// # Errors
    ///
    /// The calculator's input rejection, unchanged.
    pub fn evaluate(&self, sampling: &Sampling) -> OpsResult<ModelReport> {
        let report = match self {
            Self::Production(request) => {
                ModelReport::Production(production_report(request, sampling.region_samples)?)
            }
            Self::Inventory(request) => {
                ModelReport::Inventory(compute_eoq(request, sampling.eoq_curve_points)?)
            }
            Self::Queueing(request) => {
                ModelReport::Queueing(compute_queue(request, sampling.queue_curve_points)?)
            }
            Self::Seasonal => ModelReport::Seasonal(seasonal_demand()),
        };
        Ok(report)
    }
}

/// A calculator's successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum ModelReport {
    /// Production plan and region.
    Production(ProductionReport),
    /// EOQ and cost curve.
    Inventory(EoqReport),
    /// Queue metrics.
    Queueing(QueueReport),
    /// Seasonal series.
    Seasonal(SeasonalSeries),
}

impl ModelReport {
    /// Which menu entry produced this.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::Production(_) => ModelKind::Production,
            Self::Inventory(_) => ModelKind::Inventory,
            Self::Queueing(_) => ModelKind::Queueing,
            Self::Seasonal(_) => ModelKind::Seasonal,
        }
    }
}
