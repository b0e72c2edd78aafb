//! # fromagerie
//!
//! Operations-research calculators for a cheese plant:
//! - Production mix: two-product linear program with its feasible region
//! - Inventory: Economic Order Quantity with the cost curve around it
//! - Queueing: M/M/1 intake station metrics
//! - Seasonal demand: fixed sinusoidal monthly forecast
//!
//! Every calculator is a pure function from a request to a report. The CLI,
//! the scenario loader and the optional terminal dashboard only feed
//! requests in and render reports out.
//!
//! ## Example
//!
//! ```rust
//! use fromagerie::prelude::*;
//!
//! let plan = optimize_production(&ProductionRequest::default())?;
//! assert!((plan.max_value - 2200.0).abs() < 1e-9);
//!
//! let report = compute_eoq(&InventoryRequest::new(12_000.0, 50_000.0, 2_000.0), 100)?;
//! assert!((report.eoq - 774.596_669).abs() < 1e-6);
//!
//! let queue = compute_queue(&QueueRequest::new(8.0, 10.0), 100)?;
//! assert!((queue.mean_in_system - 4.0).abs() < 1e-9);
//! # Ok::<(), fromagerie::OpsError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::many_single_char_names,
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod visualization;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DashboardConfig, DashboardConfigBuilder};
    pub use crate::error::{LpFailure, OpsError, OpsResult};
    pub use crate::models::inventory::{compute_eoq, economic_order_quantity, InventoryRequest};
    pub use crate::models::production::{optimize_production, ConstraintRow, ProductionRequest};
    pub use crate::models::queueing::{compute_queue, mean_in_system, QueueRequest};
    pub use crate::models::seasonal::{demand_for_month, seasonal_demand};
    pub use crate::models::{Model, ModelKind, ModelReport, Sampling};
}

/// Re-export for public API
pub use error::{OpsError, OpsResult};
