//! CLI command handlers.
//!
//! Each handler resolves its inputs (command-line value, else scenario
//! value, else built-in default), evaluates one calculator and prints the
//! report or the reason it was refused.

use std::path::Path;
use std::process::ExitCode;

use crate::config::{DashboardConfig, OutputFormat};
use crate::error::OpsResult;
use crate::models::production::ConstraintRow;
use crate::models::{Model, ModelKind};

use super::args::RowArg;
use super::output::{format_rejection, format_report, print_help, print_menu, print_version};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
/// Exits 2 on a malformed command line and 1 when a calculator refuses
/// its input or the scenario cannot be loaded.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    if let Some(message) = &args.usage_error {
        eprintln!("Error: {message}");
        print_help();
        return ExitCode::from(2);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    crate::logging::init_with_config(&config.logging);

    match args.command.clone() {
        Command::Production {
            profit_a,
            profit_b,
            row1,
            row2,
        } => {
            let mut request = config.production_request();
            if let Some(a1) = profit_a {
                request.profit_a = a1;
            }
            if let Some(a2) = profit_b {
                request.profit_b = a2;
            }
            for (index, row) in [row1, row2].into_iter().enumerate() {
                if let Some(row) = row {
                    override_row(&mut request.constraints, index, row);
                }
            }
            evaluate_and_print(&Model::Production(request), &config)
        }
        Command::Inventory {
            demand,
            order_cost,
            holding_cost,
        } => {
            let mut request = config.inventory_request();
            request.annual_demand = demand.unwrap_or(request.annual_demand);
            request.order_cost = order_cost.unwrap_or(request.order_cost);
            request.holding_cost = holding_cost.unwrap_or(request.holding_cost);
            evaluate_and_print(&Model::Inventory(request), &config)
        }
        Command::Queue { arrival, service } => {
            let mut request = config.queue_request();
            request.arrival_rate = arrival.unwrap_or(request.arrival_rate);
            request.service_rate = service.unwrap_or(request.service_rate);
            evaluate_and_print(&Model::Queueing(request), &config)
        }
        Command::Seasonal => evaluate_and_print(&Model::Seasonal, &config),
        Command::Run {
            scenario_path,
            model,
        } => run_scenario(&scenario_path, model, &args),
        Command::Menu => {
            print_menu();
            ExitCode::SUCCESS
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Scenario from `--config` (or defaults), with the global flags applied.
///
/// # Errors
///
/// Returns error if the scenario file cannot be loaded.
pub fn load_config(args: &Args) -> OpsResult<DashboardConfig> {
    let mut config = match &args.config_path {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    apply_flags(&mut config, args);
    Ok(config)
}

fn apply_flags(config: &mut DashboardConfig, args: &Args) {
    if args.json {
        config.output.format = OutputFormat::Json;
    }
    if args.no_chart {
        config.output.show_charts = false;
    }
}

/// Replace row `index`, appending when the scenario has fewer rows.
fn override_row(rows: &mut Vec<ConstraintRow>, index: usize, (x1, x2, limit): RowArg) {
    match rows.get_mut(index) {
        Some(row) => {
            row.x1 = x1;
            row.x2 = x2;
            row.limit = limit;
        }
        None => rows.push(ConstraintRow::new(x1, x2, limit)),
    }
}

/// Evaluate one calculator and print its report or refusal.
#[must_use]
pub fn evaluate_and_print(model: &Model, config: &DashboardConfig) -> ExitCode {
    if print_evaluation(model, config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Returns whether a report was printed.
fn print_evaluation(model: &Model, config: &DashboardConfig) -> bool {
    let kind = model.kind();
    match model.evaluate(&config.sampling()) {
        Ok(report) => match format_report(&report, &config.output) {
            Ok(text) => {
                println!("{text}");
                true
            }
            Err(e) => {
                eprintln!("Error: {e}");
                false
            }
        },
        Err(e) => {
            tracing::warn!(model = kind.command(), error = %e, "calculator refused input");
            eprint!("{}", format_rejection(kind, &e));
            false
        }
    }
}

/// Evaluate one or all calculators from a scenario file.
///
/// Every selected calculator runs even if an earlier one refuses its
/// input; the exit code reports whether any refused.
#[must_use]
pub fn run_scenario(path: &Path, only: Option<ModelKind>, args: &Args) -> ExitCode {
    let mut config = match DashboardConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Error loading scenario '{}': {e}", path.display());
            return ExitCode::from(1);
        }
    };
    apply_flags(&mut config, args);
    tracing::info!(scenario = %path.display(), name = %config.dashboard.name, "running scenario");

    if config.output.format == OutputFormat::Text && !config.dashboard.name.is_empty() {
        println!("Scenario: {}\n", config.dashboard.name);
    }

    let kinds: Vec<ModelKind> = only.map_or_else(|| ModelKind::ALL.to_vec(), |k| vec![k]);
    let failures = kinds
        .iter()
        .filter(|&&kind| !print_evaluation(&config.model(kind), &config))
        .count();

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
