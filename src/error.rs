//! Error types for fromagerie.
//!
//! Every calculator returns `Result<T, OpsError>` instead of panicking.
//! The four input-rejection variants are deterministic functions of the
//! request, so none of them is ever worth retrying.

use thiserror::Error;

/// Result type alias for fromagerie operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Unified error type for all fromagerie operations.
#[derive(Debug, Error)]
pub enum OpsError {
    // ===== Calculator rejections =====
    /// The production LP has no bounded optimum.
    #[error("No optimal production plan: the problem is {0}")]
    InfeasibleOrUnbounded(LpFailure),

    /// A required parameter is out of its domain (non-positive or non-finite).
    #[error("Invalid parameter '{name}' = {value}: {requirement}")]
    InvalidParameter {
        /// Parameter name as shown to the user.
        name: String,
        /// Rejected value.
        value: f64,
        /// What the value must satisfy.
        requirement: &'static str,
    },

    /// M/M/1 queue with arrival rate at or above service rate.
    #[error("Unstable system: arrival rate {arrival_rate} >= service rate {service_rate}")]
    UnstableSystem {
        /// Arrival rate λ.
        arrival_rate: f64,
        /// Service rate μ.
        service_rate: f64,
    },

    /// A constraint row that cannot be drawn as a boundary line.
    #[error("Degenerate constraint #{index}: both coefficients are zero")]
    DegenerateConstraint {
        /// 1-based row index.
        index: usize,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Why the production LP failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LpFailure {
    /// No point satisfies every constraint.
    Infeasible,
    /// Profit grows without bound inside the feasible region.
    Unbounded,
}

impl std::fmt::Display for LpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Infeasible => f.write_str("infeasible"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl OpsError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, value: f64, requirement: &'static str) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            requirement,
        }
    }

    /// Check if this error is a calculator refusing its input.
    #[must_use]
    pub const fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::InfeasibleOrUnbounded(_)
                | Self::InvalidParameter { .. }
                | Self::UnstableSystem { .. }
                | Self::DegenerateConstraint { .. }
        )
    }
}

/// Reject values that are not strictly positive and finite.
///
/// # Errors
///
/// Returns `OpsError::InvalidParameter` naming `name`.
pub fn require_positive(name: &str, value: f64) -> OpsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OpsError::invalid_parameter(name, value, "must be a finite value > 0"))
    }
}

/// Reject non-finite values.
///
/// # Errors
///
/// Returns `OpsError::InvalidParameter` naming `name`.
pub fn require_finite(name: &str, value: f64) -> OpsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OpsError::invalid_parameter(name, value, "must be finite"))
    }
}
