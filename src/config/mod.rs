//! Scenario configuration with YAML schema and validation.
//!
//! A scenario file holds the default inputs of every calculator plus
//! output and logging settings. Every section is optional.
//!
//! Structural limits (sample counts, chart size) are checked here by
//! `validator`; whether an input makes sense for its calculator (D > 0,
//! λ < μ, ...) is left to the calculator, which reports it explicitly.
//!
//! ```yaml
//! dashboard:
//!   name: Plant North
//! inventory:
//!   annual_demand: 12000
//!   order_cost: 50000
//!   holding_cost: 2000
//! queueing:
//!   arrival_rate: 8
//!   service_rate: 10
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{OpsError, OpsResult};
use crate::models::production::ConstraintRow;
use crate::models::{
    inventory, production, queueing, InventoryRequest, Model, ModelKind, ProductionRequest,
    QueueRequest, Sampling,
};

/// Top-level scenario configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Scenario metadata.
    #[serde(default)]
    pub dashboard: DashboardMeta,

    /// Production optimizer inputs.
    #[validate(nested)]
    #[serde(default)]
    pub production: ProductionConfig,

    /// EOQ inputs.
    #[validate(nested)]
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// M/M/1 inputs.
    #[validate(nested)]
    #[serde(default)]
    pub queueing: QueueingConfig,

    /// Report rendering.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl DashboardConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> OpsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Reject numbers YAML can express but no calculator accepts.
    fn validate_semantic(&self) -> OpsResult<()> {
        let p = &self.production;
        let mut values = vec![
            ("production.profit_a", p.profit_a),
            ("production.profit_b", p.profit_b),
            ("inventory.annual_demand", self.inventory.annual_demand),
            ("inventory.order_cost", self.inventory.order_cost),
            ("inventory.holding_cost", self.inventory.holding_cost),
            ("queueing.arrival_rate", self.queueing.arrival_rate),
            ("queueing.service_rate", self.queueing.service_rate),
        ];
        for row in &p.constraints {
            values.extend([
                ("production.constraints.x1", row.x1),
                ("production.constraints.x2", row.x2),
                ("production.constraints.limit", row.limit),
            ]);
        }

        if let Some((name, value)) = values.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(OpsError::config(format!("{name} must be finite, got {value}")));
        }

        Ok(())
    }

    /// Production request from the scenario.
    #[must_use]
    pub fn production_request(&self) -> ProductionRequest {
        ProductionRequest {
            profit_a: self.production.profit_a,
            profit_b: self.production.profit_b,
            constraints: self.production.constraints.clone(),
        }
    }

    /// EOQ request from the scenario.
    #[must_use]
    pub const fn inventory_request(&self) -> InventoryRequest {
        InventoryRequest::new(
            self.inventory.annual_demand,
            self.inventory.order_cost,
            self.inventory.holding_cost,
        )
    }

    /// M/M/1 request from the scenario.
    #[must_use]
    pub const fn queue_request(&self) -> QueueRequest {
        QueueRequest::new(self.queueing.arrival_rate, self.queueing.service_rate)
    }

    /// Chart sampling resolution.
    #[must_use]
    pub const fn sampling(&self) -> Sampling {
        Sampling {
            region_samples: self.production.region_samples,
            eoq_curve_points: self.inventory.curve_points,
            queue_curve_points: self.queueing.curve_points,
        }
    }

    /// The menu choice for `kind` with this scenario's inputs.
    #[must_use]
    pub fn model(&self, kind: ModelKind) -> Model {
        match kind {
            ModelKind::Production => Model::Production(self.production_request()),
            ModelKind::Inventory => Model::Inventory(self.inventory_request()),
            ModelKind::Queueing => Model::Queueing(self.queue_request()),
            ModelKind::Seasonal => Model::Seasonal,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            dashboard: DashboardMeta::default(),
            production: ProductionConfig::default(),
            inventory: InventoryConfig::default(),
            queueing: QueueingConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    production: Option<ProductionRequest>,
    inventory: Option<InventoryRequest>,
    queueing: Option<QueueRequest>,
    format: Option<OutputFormat>,
}

impl DashboardConfigBuilder {
    /// Set the production inputs.
    #[must_use]
    pub fn production(mut self, request: ProductionRequest) -> Self {
        self.production = Some(request);
        self
    }

    /// Set the EOQ inputs.
    #[must_use]
    pub const fn inventory(mut self, request: InventoryRequest) -> Self {
        self.inventory = Some(request);
        self
    }

    /// Set the M/M/1 inputs.
    #[must_use]
    pub const fn queueing(mut self, request: QueueRequest) -> Self {
        self.queueing = Some(request);
        self
    }

    /// Set the report format.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DashboardConfig {
        let mut config = DashboardConfig::default();

        if let Some(request) = self.production {
            config.production.profit_a = request.profit_a;
            config.production.profit_b = request.profit_b;
            config.production.constraints = request.constraints;
        }

        if let Some(request) = self.inventory {
            config.inventory.annual_demand = request.annual_demand;
            config.inventory.order_cost = request.order_cost;
            config.inventory.holding_cost = request.holding_cost;
        }

        if let Some(request) = self.queueing {
            config.queueing.arrival_rate = request.arrival_rate;
            config.queueing.service_rate = request.service_rate;
        }

        if let Some(format) = self.format {
            config.output.format = format;
        }

        config
    }
}

/// Scenario metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMeta {
    /// Scenario name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Production optimizer section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductionConfig {
    /// Profit per unit of cheese A.
    #[serde(default = "default_profit_a")]
    pub profit_a: f64,
    /// Profit per unit of cheese B.
    #[serde(default = "default_profit_b")]
    pub profit_b: f64,
    /// Resource rows (at most two).
    #[validate(length(min = 1, max = 2))]
    #[serde(default = "default_constraints")]
    pub constraints: Vec<ConstraintRow>,
    /// Samples across the plotted x range.
    #[validate(range(min = 2, max = 100_000))]
    #[serde(default = "default_region_samples")]
    pub region_samples: usize,
}

fn default_profit_a() -> f64 {
    ProductionRequest::default().profit_a
}

fn default_profit_b() -> f64 {
    ProductionRequest::default().profit_b
}

fn default_constraints() -> Vec<ConstraintRow> {
    ProductionRequest::default().constraints
}

const fn default_region_samples() -> usize {
    production::DEFAULT_REGION_SAMPLES
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            profit_a: default_profit_a(),
            profit_b: default_profit_b(),
            constraints: default_constraints(),
            region_samples: default_region_samples(),
        }
    }
}

/// EOQ section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InventoryConfig {
    /// Annual demand (kg).
    #[serde(default = "default_annual_demand")]
    pub annual_demand: f64,
    /// Cost per order.
    #[serde(default = "default_order_cost")]
    pub order_cost: f64,
    /// Holding cost per kg per year.
    #[serde(default = "default_holding_cost")]
    pub holding_cost: f64,
    /// Samples on the cost curve.
    #[validate(range(min = 2, max = 100_000))]
    #[serde(default = "default_eoq_curve_points")]
    pub curve_points: usize,
}

fn default_annual_demand() -> f64 {
    InventoryRequest::default().annual_demand
}

fn default_order_cost() -> f64 {
    InventoryRequest::default().order_cost
}

fn default_holding_cost() -> f64 {
    InventoryRequest::default().holding_cost
}

const fn default_eoq_curve_points() -> usize {
    inventory::DEFAULT_CURVE_POINTS
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            annual_demand: default_annual_demand(),
            order_cost: default_order_cost(),
            holding_cost: default_holding_cost(),
            curve_points: default_eoq_curve_points(),
        }
    }
}

/// M/M/1 section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QueueingConfig {
    /// Arrival rate λ per hour.
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate: f64,
    /// Service rate μ per hour.
    #[serde(default = "default_service_rate")]
    pub service_rate: f64,
    /// Samples on the L(ρ) curve.
    #[validate(range(min = 2, max = 100_000))]
    #[serde(default = "default_queue_curve_points")]
    pub curve_points: usize,
}

fn default_arrival_rate() -> f64 {
    QueueRequest::default().arrival_rate
}

fn default_service_rate() -> f64 {
    QueueRequest::default().service_rate
}

const fn default_queue_curve_points() -> usize {
    queueing::DEFAULT_CURVE_POINTS
}

impl Default for QueueingConfig {
    fn default() -> Self {
        Self {
            arrival_rate: default_arrival_rate(),
            service_rate: default_service_rate(),
            curve_points: default_queue_curve_points(),
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable report with a text chart.
    #[default]
    Text,
    /// One JSON document per report.
    Json,
}

/// Output section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Draw charts in text reports.
    #[serde(default = "default_true")]
    pub show_charts: bool,
    /// Chart plot width in characters.
    #[validate(range(min = 10, max = 400))]
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    /// Chart plot height in characters.
    #[validate(range(min = 4, max = 200))]
    #[serde(default = "default_chart_height")]
    pub chart_height: usize,
}

const fn default_true() -> bool {
    true
}

const fn default_chart_width() -> usize {
    60
}

const fn default_chart_height() -> usize {
    16
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_charts: true,
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
        }
    }
}

/// Log filter: a default level plus per-module overrides.
///
/// `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub default: String,
    /// Module path to level.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive string, e.g. `warn,fromagerie::models=debug`.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut filter = self.default.clone();
        for (module, level) in &self.modules {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}
