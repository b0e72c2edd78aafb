//! Calculator 3: M/M/1 Queue
//!
//! Single intake station for incoming milk deliveries (or any single
//! server with Poisson arrivals and exponential service).
//!
//! # Governing Equations
//!
//! ```text
//! ρ  = λ/μ              utilization
//! L  = ρ/(1-ρ)          mean number in system
//! W  = 1/(μ-λ)          mean time in system
//! Lq = ρ²/(1-ρ)         mean number waiting
//! Wq = ρ/(μ-λ)          mean wait before service
//! P0 = 1-ρ              probability the server is idle
//! ```
//!
//! Only defined for 0 < λ < μ. L grows hyperbolically as ρ → 1, and
//! Little's Law L = λW holds for every stable configuration.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, OpsError, OpsResult};

/// Lowest utilization on the reference curve.
pub const CURVE_RHO_MIN: f64 = 0.01;

/// Highest utilization on the reference curve.
pub const CURVE_RHO_MAX: f64 = 0.99;

/// Default number of samples on the reference curve.
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// M/M/1 request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueRequest {
    /// Arrival rate λ (per hour).
    pub arrival_rate: f64,
    /// Service rate μ (per hour).
    pub service_rate: f64,
}

impl Default for QueueRequest {
    fn default() -> Self {
        Self {
            arrival_rate: 8.0,
            service_rate: 10.0,
        }
    }
}

impl QueueRequest {
    /// Create a new request.
    #[must_use]
    pub const fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
        }
    }
}

/// Steady-state M/M/1 metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueReport {
    /// The request that produced this report.
    pub request: QueueRequest,
    /// Utilization ρ.
    pub utilization: f64,
    /// Mean number in system L.
    pub mean_in_system: f64,
    /// Mean time in system W (hours).
    pub mean_time_in_system: f64,
    /// Mean number waiting Lq.
    pub mean_in_queue: f64,
    /// Mean wait before service Wq (hours).
    pub mean_wait_in_queue: f64,
    /// Probability the server is idle.
    pub idle_probability: f64,
    /// `(ρ, L(ρ))` over the open interval (0, 1).
    pub reference_curve: Vec<(f64, f64)>,
}

impl QueueReport {
    /// Relative gap between L and λW; zero up to rounding.
    #[must_use]
    pub fn littles_law_error(&self) -> f64 {
        let predicted = self.request.arrival_rate * self.mean_time_in_system;
        (self.mean_in_system - predicted).abs() / self.mean_in_system
    }
}

/// `L(ρ) = ρ/(1-ρ)`, infinite at and beyond ρ = 1.
#[must_use]
pub fn mean_in_system(rho: f64) -> f64 {
    if rho >= 1.0 {
        f64::INFINITY
    } else {
        rho / (1.0 - rho)
    }
}

/// Compute steady-state metrics.
///
/// # Errors
///
/// `InvalidParameter` when λ or μ is not a finite value > 0;
/// `UnstableSystem` when λ ≥ μ.
pub fn compute_queue(request: &QueueRequest, curve_points: usize) -> OpsResult<QueueReport> {
    let lambda = require_positive("arrival rate", request.arrival_rate)?;
    let mu = require_positive("service rate", request.service_rate)?;

    if lambda >= mu {
        tracing::debug!(lambda, mu, "M/M/1 configuration unstable");
        return Err(OpsError::UnstableSystem {
            arrival_rate: lambda,
            service_rate: mu,
        });
    }

    let rho = lambda / mu;
    let report = QueueReport {
        request: *request,
        utilization: rho,
        mean_in_system: mean_in_system(rho),
        mean_time_in_system: 1.0 / (mu - lambda),
        mean_in_queue: rho * rho / (1.0 - rho),
        mean_wait_in_queue: rho / (mu - lambda),
        idle_probability: 1.0 - rho,
        reference_curve: reference_curve(curve_points),
    };
    tracing::debug!(rho, l = report.mean_in_system, w = report.mean_time_in_system, "M/M/1 computed");
    Ok(report)
}

/// Sample `L(ρ)` evenly over `[0.01, 0.99]`.
#[must_use]
pub fn reference_curve(points: usize) -> Vec<(f64, f64)> {
    let points = points.max(2);
    let step = (CURVE_RHO_MAX - CURVE_RHO_MIN) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let rho = CURVE_RHO_MIN + i as f64 * step;
            (rho, mean_in_system(rho))
        })
        .collect()
}
