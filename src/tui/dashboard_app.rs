//! Operations dashboard TUI application state and logic.
//!
//! Holds the selected calculator, the editable input fields and the latest
//! result. Every edit re-runs the selected calculator synchronously, so the
//! result panel always matches what is on screen. Terminal I/O lives in the
//! `fromagerie-tui` binary.
//!
//! ```bash
//! cargo run --features tui --bin fromagerie-tui -- scenarios/cheese_plant.yaml
//! ```

use std::path::Path;

use crossterm::event::KeyCode;

use crate::cli::format_rejection;
use crate::config::DashboardConfig;
use crate::error::OpsResult;
use crate::models::production::ConstraintRow;
use crate::models::{
    InventoryRequest, Model, ModelKind, ModelReport, ProductionRequest, QueueRequest, Sampling,
};
use crate::visualization::Chart;

/// One editable numeric input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Label shown next to the value.
    pub label: &'static str,
    /// Text as typed.
    pub text: String,
}

impl InputField {
    fn new(label: &'static str, value: f64) -> Self {
        Self {
            label,
            text: value.to_string(),
        }
    }

    fn blank(label: &'static str) -> Self {
        Self {
            label,
            text: String::new(),
        }
    }

    fn parse(&self) -> Result<f64, String> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(format!("{} is empty", self.label));
        }
        text.parse::<f64>()
            .map_err(|_| format!("{} is not a number: '{text}'", self.label))
    }
}

const PRODUCTION_LABELS: [&str; 8] = [
    "Profit A (a1)",
    "Profit B (a2)",
    "Row 1: A (b1)",
    "Row 1: B (b2)",
    "Row 1: limit",
    "Row 2: A (c1)",
    "Row 2: B (c2)",
    "Row 2: limit",
];

/// Application state for the dashboard TUI.
#[derive(Debug, Clone)]
pub struct DashboardApp {
    /// Calculator on screen.
    pub selected: ModelKind,
    /// Index of the focused field within the selected calculator.
    pub focus: usize,
    /// Production inputs: a1, a2, then two `a, b, limit` rows.
    pub production: Vec<InputField>,
    /// Inventory inputs: D, S, H.
    pub inventory: Vec<InputField>,
    /// Queue inputs: λ, μ.
    pub queueing: Vec<InputField>,
    /// Latest evaluation: a report, or why there is none.
    pub result: Result<ModelReport, String>,
    /// Curve resolution.
    pub sampling: Sampling,
    /// Scenario name, if loaded from a file.
    pub scenario_name: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    config: DashboardConfig,
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardApp {
    /// Create an app with the built-in default inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(DashboardConfig::default())
    }

    /// Create an app seeded from a scenario.
    #[must_use]
    pub fn from_config(config: DashboardConfig) -> Self {
        let scenario_name = Some(config.dashboard.name.clone()).filter(|name| !name.is_empty());
        let mut app = Self {
            selected: ModelKind::Production,
            focus: 0,
            production: Vec::new(),
            inventory: Vec::new(),
            queueing: Vec::new(),
            result: Err(String::new()),
            sampling: config.sampling(),
            scenario_name,
            should_quit: false,
            config,
        };
        app.reset();
        app
    }

    /// Create an app from a scenario file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> OpsResult<Self> {
        DashboardConfig::load(path).map(Self::from_config)
    }

    /// Restore every field to the scenario values and recompute.
    pub fn reset(&mut self) {
        self.production = production_fields(&self.config.production_request());
        let inventory = self.config.inventory_request();
        self.inventory = vec![
            InputField::new("Annual demand (D)", inventory.annual_demand),
            InputField::new("Order cost (S)", inventory.order_cost),
            InputField::new("Holding cost (H)", inventory.holding_cost),
        ];
        let queue = self.config.queue_request();
        self.queueing = vec![
            InputField::new("Arrival rate (λ)", queue.arrival_rate),
            InputField::new("Service rate (μ)", queue.service_rate),
        ];
        self.focus = self.focus.min(self.fields().len().saturating_sub(1));
        self.recompute();
    }

    /// Input fields of the selected calculator.
    #[must_use]
    pub fn fields(&self) -> &[InputField] {
        match self.selected {
            ModelKind::Production => &self.production,
            ModelKind::Inventory => &self.inventory,
            ModelKind::Queueing => &self.queueing,
            ModelKind::Seasonal => &[],
        }
    }

    fn fields_mut(&mut self) -> Option<&mut Vec<InputField>> {
        match self.selected {
            ModelKind::Production => Some(&mut self.production),
            ModelKind::Inventory => Some(&mut self.inventory),
            ModelKind::Queueing => Some(&mut self.queueing),
            ModelKind::Seasonal => None,
        }
    }

    fn focused_mut(&mut self) -> Option<&mut InputField> {
        let focus = self.focus;
        self.fields_mut().and_then(|fields| fields.get_mut(focus))
    }

    /// Build the selected calculator's request from the fields.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first field that does not parse.
    pub fn model(&self) -> Result<Model, String> {
        match self.selected {
            ModelKind::Production => {
                let scenario = self.config.production_request();
                parse_production(&self.production, &scenario.constraints).map(Model::Production)
            }
            ModelKind::Inventory => {
                let [d, s, h] = parse_all::<3>(&self.inventory)?;
                Ok(Model::Inventory(InventoryRequest::new(d, s, h)))
            }
            ModelKind::Queueing => {
                let [lambda, mu] = parse_all::<2>(&self.queueing)?;
                Ok(Model::Queueing(QueueRequest::new(lambda, mu)))
            }
            ModelKind::Seasonal => Ok(Model::Seasonal),
        }
    }

    /// Re-run the selected calculator.
    pub fn recompute(&mut self) {
        let kind = self.selected;
        self.result = self.model().and_then(|model| {
            model.evaluate(&self.sampling).map_err(|e| {
                tracing::debug!(model = kind.command(), error = %e, "input rejected");
                format_rejection(kind, &e)
            })
        });
    }

    /// Chart for the latest result.
    #[must_use]
    pub fn chart(&self) -> Option<Chart> {
        self.result.as_ref().ok().map(Chart::from)
    }

    /// Switch calculator.
    pub fn select(&mut self, kind: ModelKind) {
        if kind != self.selected {
            self.selected = kind;
            self.focus = 0;
            self.recompute();
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Tab => self.select(self.selected.next()),
            KeyCode::Left | KeyCode::BackTab => self.select(self.selected.previous()),
            KeyCode::Down => {
                let len = self.fields().len();
                if len > 0 {
                    self.focus = (self.focus + 1) % len;
                }
            }
            KeyCode::Up => {
                let len = self.fields().len();
                if len > 0 {
                    self.focus = (self.focus + len - 1) % len;
                }
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e') => {
                if let Some(field) = self.focused_mut() {
                    field.text.push(c);
                    self.recompute();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_mut() {
                    field.text.pop();
                    self.recompute();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.focused_mut() {
                    field.text.clear();
                    self.recompute();
                }
            }
            _ => {}
        }
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn production_fields(request: &ProductionRequest) -> Vec<InputField> {
    let mut fields = vec![
        InputField::new(PRODUCTION_LABELS[0], request.profit_a),
        InputField::new(PRODUCTION_LABELS[1], request.profit_b),
    ];
    for (row_index, labels) in PRODUCTION_LABELS[2..].chunks_exact(3).enumerate() {
        match request.constraints.get(row_index) {
            Some(row) => fields.extend([
                InputField::new(labels[0], row.x1),
                InputField::new(labels[1], row.x2),
                InputField::new(labels[2], row.limit),
            ]),
            None => fields.extend(labels.iter().map(|&label| InputField::blank(label))),
        }
    }
    fields
}

/// A row whose three fields are all blank is left out. Rows keep the
/// label of the scenario row in the same slot.
fn parse_production(
    fields: &[InputField],
    scenario_rows: &[ConstraintRow],
) -> Result<ProductionRequest, String> {
    let [profit_a, profit_b] = parse_all::<2>(&fields[..2])?;
    let mut constraints = Vec::with_capacity(2);
    for (slot, row) in fields[2..].chunks_exact(3).enumerate() {
        if row.iter().all(|f| f.text.trim().is_empty()) {
            continue;
        }
        let [x1, x2, limit] = parse_all::<3>(row)?;
        let label = scenario_rows.get(slot).map_or("", |r| r.label.as_str());
        constraints.push(ConstraintRow::new(x1, x2, limit).labelled(label));
    }
    Ok(ProductionRequest {
        profit_a,
        profit_b,
        constraints,
    })
}

fn parse_all<const N: usize>(fields: &[InputField]) -> Result<[f64; N], String> {
    let mut values = [0.0; N];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse()?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(app: &mut DashboardApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn clear_focused(app: &mut DashboardApp) {
        app.handle_key(KeyCode::Delete);
    }

    #[test]
    fn test_new_app() {
        let app = DashboardApp::new();
        assert_eq!(app.selected, ModelKind::Production);
        assert_eq!(app.focus, 0);
        assert!(!app.should_quit());
        assert_eq!(app.production.len(), 8);
        assert_eq!(app.inventory.len(), 3);
        assert_eq!(app.queueing.len(), 2);
        assert!(app.result.is_ok());
    }

    #[test]
    fn test_default_production_result() {
        let app = DashboardApp::new();
        let Ok(ModelReport::Production(report)) = &app.result else {
            panic!("expected production report");
        };
        assert!((report.plan.x1 - 40.0).abs() < 1e-9);
        assert!((report.plan.x2 - 20.0).abs() < 1e-9);
        assert!((report.plan.max_value - 2200.0).abs() < 1e-9);
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = DashboardApp::new();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = DashboardApp::new();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut app = DashboardApp::new();
        app.handle_key(KeyCode::Left);
        assert_eq!(app.selected, ModelKind::Seasonal);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.selected, ModelKind::Production);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selected, ModelKind::Inventory);
    }

    #[test]
    fn test_switching_model_recomputes() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Queueing);
        let Ok(ModelReport::Queueing(report)) = &app.result else {
            panic!("expected queue report");
        };
        assert!((report.mean_in_system - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_focus_wraps_within_fields() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Queueing);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.focus, 1);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_seasonal_has_no_fields() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Seasonal);
        app.handle_key(KeyCode::Down);
        type_into(&mut app, "5");
        assert_eq!(app.focus, 0);
        assert!(matches!(app.result, Ok(ModelReport::Seasonal(_))));
    }

    #[test]
    fn test_editing_recomputes_eoq() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Inventory);
        clear_focused(&mut app);
        assert!(app.result.is_err());
        type_into(&mut app, "48000");
        let Ok(ModelReport::Inventory(report)) = &app.result else {
            panic!("expected EOQ report");
        };
        // √(2·48000·50000/2000) = √2400000
        assert!((report.eoq - 2_400_000_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Queueing);
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.queueing[0].text, "");
        assert!(app.result.as_ref().is_err_and(|e| e.contains("is empty")));
    }

    #[test]
    fn test_unstable_queue_is_reported() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Queueing);
        clear_focused(&mut app);
        type_into(&mut app, "12");
        let message = app.result.as_ref().expect_err("unstable");
        assert!(message.contains("Unstable system"));
        assert!(app.chart().is_none());
    }

    #[test]
    fn test_blank_second_row_is_dropped() {
        let mut app = DashboardApp::new();
        app.focus = 5;
        for _ in 0..3 {
            clear_focused(&mut app);
            app.handle_key(KeyCode::Down);
        }
        let Ok(Model::Production(request)) = app.model() else {
            panic!("expected production model");
        };
        assert_eq!(request.constraints.len(), 1);
        // Only 2A + B ≤ 100 remains: best is B = 100 at profit 3000.
        let Ok(ModelReport::Production(report)) = &app.result else {
            panic!("expected production report");
        };
        assert!((report.plan.max_value - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_edited_rows_keep_scenario_labels() {
        let mut app = DashboardApp::new();
        app.focus = 4;
        clear_focused(&mut app);
        type_into(&mut app, "120");
        let Ok(Model::Production(request)) = app.model() else {
            panic!("expected production model");
        };
        assert_eq!(request.constraints[0].limit, 120.0);
        assert_eq!(request.constraints[0].label, "Raw milk");
        assert_eq!(request.constraints[1].label, "Labour hours");
        let Ok(ModelReport::Production(report)) = &app.result else {
            panic!("expected production report");
        };
        assert_eq!(report.plan.usage[0].label, "Raw milk");
    }

    #[test]
    fn test_reset_restores_inputs() {
        let mut app = DashboardApp::new();
        clear_focused(&mut app);
        assert!(app.result.is_err());
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.production[0].text, "40");
        assert!(app.result.is_ok());
    }

    #[test]
    fn test_from_config_uses_scenario_values() {
        let config = DashboardConfig::builder()
            .queueing(QueueRequest::new(3.0, 6.0))
            .build();
        let mut app = DashboardApp::from_config(config);
        app.select(ModelKind::Queueing);
        assert_eq!(app.queueing[0].text, "3");
        let Ok(ModelReport::Queueing(report)) = &app.result else {
            panic!("expected queue report");
        };
        assert!((report.utilization - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plant.yaml");
        std::fs::write(&path, "dashboard:\n  name: North dairy\n").expect("write");
        let app = DashboardApp::from_yaml_file(&path).expect("load");
        assert_eq!(app.scenario_name.as_deref(), Some("North dairy"));
        assert!(DashboardApp::from_yaml_file(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_chart_follows_selection() {
        let mut app = DashboardApp::new();
        app.select(ModelKind::Seasonal);
        let chart = app.chart().expect("chart");
        assert_eq!(chart.title, "Seasonal Demand Forecast");
    }
}
