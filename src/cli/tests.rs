//! CLI module tests.

use super::args::{Args, Command};
use super::commands::{evaluate_and_print, load_config, run_cli, run_scenario};
use super::output::{
    format_banner, format_json, format_menu, format_rejection, format_report, format_version,
    group_thousands,
};
use crate::config::{DashboardConfig, OutputConfig, OutputFormat};
use crate::error::{LpFailure, OpsError};
use crate::models::{
    InventoryRequest, Model, ModelKind, ProductionRequest, QueueRequest, Sampling,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["fromagerie"]);
    assert_eq!(args.command, Command::Help);
    assert_eq!(args.usage_error, None);
}

#[test]
fn test_parse_help_and_version_flags() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["fromagerie", flag]).command, Command::Help);
    }
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["fromagerie", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["fromagerie", "bake"]);
    assert_eq!(args.command, Command::Help);
    assert_eq!(args.usage_error.as_deref(), Some("Unknown command: bake"));
}

#[test]
fn test_parse_config_without_path_is_usage_error() {
    let args = Args::parse_from(["fromagerie", "seasonal", "--config"]);
    assert_eq!(args.command, Command::Help);
    assert!(args.usage_error.is_some_and(|m| m.contains("--config")));
}

#[test]
fn test_parse_menu_and_seasonal() {
    assert_eq!(Args::parse_from(["fromagerie", "menu"]).command, Command::Menu);
    assert_eq!(Args::parse_from(["fromagerie", "seasonal"]).command, Command::Seasonal);
}

#[test]
fn test_parse_production_full() {
    let args = Args::parse_from([
        "fromagerie",
        "production",
        "--profit-a",
        "40",
        "--profit-b",
        "30",
        "--row1",
        "2,1,100",
        "--row2",
        "1, 2, 80",
    ]);
    assert_eq!(
        args.command,
        Command::Production {
            profit_a: Some(40.0),
            profit_b: Some(30.0),
            row1: Some((2.0, 1.0, 100.0)),
            row2: Some((1.0, 2.0, 80.0)),
        }
    );
}

#[test]
fn test_parse_production_defaults() {
    let args = Args::parse_from(["fromagerie", "lp"]);
    assert_eq!(
        args.command,
        Command::Production {
            profit_a: None,
            profit_b: None,
            row1: None,
            row2: None,
        }
    );
}

#[test]
fn test_parse_production_bad_row() {
    let args = Args::parse_from(["fromagerie", "production", "--row1", "2,1"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_inventory() {
    let args = Args::parse_from([
        "fromagerie",
        "inventory",
        "--demand",
        "12000",
        "--holding-cost",
        "2000",
    ]);
    assert_eq!(
        args.command,
        Command::Inventory {
            demand: Some(12_000.0),
            order_cost: None,
            holding_cost: Some(2_000.0),
        }
    );
}

#[test]
fn test_parse_inventory_accepts_negative_values() {
    // Rejection is the calculator's job, not the parser's.
    let args = Args::parse_from(["fromagerie", "eoq", "--demand", "-5"]);
    assert_eq!(
        args.command,
        Command::Inventory {
            demand: Some(-5.0),
            order_cost: None,
            holding_cost: None,
        }
    );
}

#[test]
fn test_parse_queue_aliases() {
    let args = Args::parse_from(["fromagerie", "mm1", "--lambda", "8", "--mu", "10"]);
    assert_eq!(
        args.command,
        Command::Queue {
            arrival: Some(8.0),
            service: Some(10.0),
        }
    );
}

#[test]
fn test_parse_non_numeric_value() {
    let args = Args::parse_from(["fromagerie", "queue", "--arrival", "fast"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_missing_value() {
    let args = Args::parse_from(["fromagerie", "queue", "--arrival"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_unknown_flag() {
    let args = Args::parse_from(["fromagerie", "queue", "--servers", "2"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_command() {
    let args = Args::parse_from(["fromagerie", "run", "plant.yaml", "--model", "eoq"]);
    assert_eq!(
        args.command,
        Command::Run {
            scenario_path: PathBuf::from("plant.yaml"),
            model: Some(ModelKind::Inventory),
        }
    );
}

#[test]
fn test_parse_run_requires_path() {
    let args = Args::parse_from(["fromagerie", "run"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_unknown_model() {
    let args = Args::parse_from(["fromagerie", "run", "plant.yaml", "--model", "pricing"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_global_flags_anywhere() {
    let args = Args::parse_from([
        "fromagerie",
        "--json",
        "queue",
        "--no-chart",
        "--config",
        "plant.yaml",
    ]);
    assert!(args.json);
    assert!(args.no_chart);
    assert_eq!(args.config_path, Some(PathBuf::from("plant.yaml")));
    assert_eq!(
        args.command,
        Command::Queue {
            arrival: None,
            service: None,
        }
    );
}

#[test]
fn test_parse_config_requires_path() {
    let args = Args::parse_from(["fromagerie", "seasonal", "--config"]);
    assert_eq!(args.command, Command::Help);
    assert_eq!(args.config_path, None);
}

// ============================================================================
// Output formatting tests
// ============================================================================

fn text_output() -> OutputConfig {
    OutputConfig::default()
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(2200.0), "2,200");
    assert_eq!(group_thousands(1_549_193.3), "1,549,193");
    assert_eq!(group_thousands(-12_000.0), "-12,000");
    assert_eq!(group_thousands(-0.2), "0");
}

#[test]
fn test_banner_width_is_stable() {
    let banner = format_banner("Menu");
    let widths: Vec<usize> = banner.lines().map(|l| l.chars().count()).collect();
    assert_eq!(widths.len(), 3);
    assert!(widths.iter().all(|&w| w == widths[0]));
}

#[test]
fn test_menu_lists_all_models() {
    let menu = format_menu();
    for kind in ModelKind::ALL {
        assert!(menu.contains(kind.label()));
        assert!(menu.contains(kind.command()));
    }
}

#[test]
fn test_version_mentions_package_version() {
    assert!(format_version().contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_production_report_text() {
    let report = Model::Production(ProductionRequest::default())
        .evaluate(&Sampling::default())
        .expect("solve");
    let text = format_report(&report, &text_output()).expect("format");
    assert!(text.contains("Cheese A = 40.00, Cheese B = 20.00"));
    assert!(text.contains("Maximum profit: 2,200"));
    assert!(text.contains("Raw milk"));
    assert!(text.contains("binding"));
    assert!(text.contains("Feasible Region"));
}

#[test]
fn test_inventory_report_text() {
    let report = Model::Inventory(InventoryRequest::default())
        .evaluate(&Sampling::default())
        .expect("eoq");
    let text = format_report(&report, &text_output()).expect("format");
    assert!(text.contains("EOQ = 774.60 kg/order"));
    assert!(text.contains("Total Cost vs Order Quantity"));
}

#[test]
fn test_queue_report_text() {
    let report = Model::Queueing(QueueRequest::default())
        .evaluate(&Sampling::default())
        .expect("queue");
    let text = format_report(&report, &text_output()).expect("format");
    assert!(text.contains("Utilization (ρ):              0.80"));
    assert!(text.contains("Customers in system (L):      4.00"));
    assert!(text.contains("Time in system (W):           0.50 h"));
}

#[test]
fn test_seasonal_report_text() {
    let report = Model::Seasonal.evaluate(&Sampling::default()).expect("series");
    let text = format_report(&report, &text_output()).expect("format");
    assert!(text.contains("Month  1:  225.00"));
    assert!(text.contains("Peak:   month 3 (250.00)"));
}

#[test]
fn test_report_without_chart() {
    let report = Model::Seasonal.evaluate(&Sampling::default()).expect("series");
    let output = OutputConfig {
        show_charts: false,
        ..OutputConfig::default()
    };
    let text = format_report(&report, &output).expect("format");
    assert!(!text.contains("Seasonal Demand Forecast"));
}

#[test]
fn test_report_json() {
    let report = Model::Queueing(QueueRequest::default())
        .evaluate(&Sampling::default())
        .expect("queue");
    let output = OutputConfig {
        format: OutputFormat::Json,
        ..OutputConfig::default()
    };
    let text = format_report(&report, &output).expect("format");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["model"], "queueing");
    assert_eq!(value["utilization"], 0.8);
    assert_eq!(format_json(&report).expect("json"), text);
}

#[test]
fn test_rejection_messages() {
    let unstable = OpsError::UnstableSystem {
        arrival_rate: 10.0,
        service_rate: 8.0,
    };
    let text = format_rejection(ModelKind::Queueing, &unstable);
    assert!(text.contains("Unstable system (λ ≥ μ)"));
    assert!(text.contains("Queueing Model"));

    let infeasible = OpsError::InfeasibleOrUnbounded(LpFailure::Infeasible);
    assert!(format_rejection(ModelKind::Production, &infeasible).contains("No optimal production plan"));

    let invalid = OpsError::invalid_parameter("order cost", 0.0, "must be > 0");
    let text = format_rejection(ModelKind::Inventory, &invalid);
    assert!(text.contains("Invalid input"));
    assert!(text.contains("order cost"));
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_evaluate_and_print_exit_codes() {
    let config = DashboardConfig::builder().format(OutputFormat::Json).build();
    assert!(same_code(
        evaluate_and_print(&Model::Seasonal, &config),
        ExitCode::SUCCESS
    ));
    let unstable = Model::Queueing(QueueRequest::new(10.0, 8.0));
    assert!(same_code(
        evaluate_and_print(&unstable, &config),
        ExitCode::from(1)
    ));
}

#[test]
fn test_load_config_applies_flags() {
    let args = Args::parse_from(["fromagerie", "--json", "--no-chart", "seasonal"]);
    let config = load_config(&args).expect("defaults");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(!config.output.show_charts);
}

#[test]
fn test_load_config_missing_file() {
    let args = Args::parse_from(["fromagerie", "--config", "/nonexistent.yaml", "seasonal"]);
    assert!(load_config(&args).is_err());
}

#[test]
fn test_run_scenario_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plant.yaml");
    std::fs::write(
        &path,
        "dashboard:\n  name: Test plant\noutput:\n  show_charts: false\n",
    )
    .expect("write");

    let args = Args::default();
    assert!(same_code(run_scenario(&path, None, &args), ExitCode::SUCCESS));
    assert!(same_code(
        run_scenario(&path, Some(ModelKind::Inventory), &args),
        ExitCode::SUCCESS
    ));
}

#[test]
fn test_run_scenario_reports_refusal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("unstable.yaml");
    std::fs::write(&path, "queueing:\n  arrival_rate: 12\n  service_rate: 10\n").expect("write");

    let args = Args::parse_from(["fromagerie", "--no-chart"]);
    assert!(same_code(run_scenario(&path, None, &args), ExitCode::from(1)));
    assert!(same_code(
        run_scenario(&path, Some(ModelKind::Seasonal), &args),
        ExitCode::SUCCESS
    ));
}

#[test]
fn test_run_scenario_missing_file() {
    let args = Args::default();
    assert!(same_code(
        run_scenario(&PathBuf::from("/nonexistent.yaml"), None, &args),
        ExitCode::from(1)
    ));
}

#[test]
fn test_run_cli_dispatches_run_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plant.yaml");
    std::fs::write(&path, "dashboard:\n  name: Test plant\n").expect("write");
    let path = path.to_string_lossy().into_owned();

    let args = Args::parse_from(["fromagerie", "--no-chart", "run", &path, "--model", "seasonal"]);
    assert!(matches!(args.command, Command::Run { .. }));
    assert!(same_code(run_cli(args), ExitCode::SUCCESS));
}

#[test]
fn test_run_cli_malformed_command_line_exits_2() {
    for argv in [
        vec!["fromagerie", "bake"],
        vec!["fromagerie", "queue", "--arrival", "abc"],
        vec!["fromagerie", "seasonal", "--config"],
    ] {
        assert!(same_code(run_cli(Args::parse_from(&argv)), ExitCode::from(2)), "{argv:?}");
    }
    assert!(same_code(
        run_cli(Args::parse_from(["fromagerie", "help"])),
        ExitCode::SUCCESS
    ));
}
