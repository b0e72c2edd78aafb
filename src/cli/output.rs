//! CLI output formatting.
//!
//! Every report is formatted into a `String` first so tests can inspect
//! it; the `print_*` wrappers only write to stdout.

use std::fmt::Write as FmtWrite;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{OpsError, OpsResult};
use crate::models::{EoqReport, ModelKind, ModelReport, ProductionReport, QueueReport, SeasonalSeries};
use crate::visualization::ascii::{self, GridSize};
use crate::visualization::Chart;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("{}", format_version());
}

/// Version line, with the git hash when the build captured one.
#[must_use]
pub fn format_version() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            format!("fromagerie {} ({})", env!("CARGO_PKG_VERSION"), &hash[..hash.len().min(12)])
        }
        _ => format!("fromagerie {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"fromagerie - Operations calculators for cheese production

USAGE:
    fromagerie [--config <scenario.yaml>] [--json] [--no-chart] <COMMAND> [OPTIONS]

COMMANDS:
    production                  Optimize the cheese A / cheese B production mix
        --profit-a <N>          Profit per unit of cheese A (a1)
        --profit-b <N>          Profit per unit of cheese B (a2)
        --row1 <a,b,limit>      First resource constraint
        --row2 <a,b,limit>      Second resource constraint

    inventory                   Economic Order Quantity
        --demand <D>            Annual demand (kg)
        --order-cost <S>        Cost per order
        --holding-cost <H>      Holding cost per kg per year

    queue                       M/M/1 queue at the intake station
        --arrival <λ>           Arrivals per hour
        --service <μ>           Services per hour

    seasonal                    Monthly demand forecast (no inputs)

    run <scenario.yaml>         Evaluate calculators from a scenario file
        --model <name>          Only one of production|inventory|queue|seasonal

    menu                        List the calculators
    help                        Show this help message
    version                     Show version information

EXAMPLES:
    fromagerie production --row1 2,1,100 --row2 1,2,80
    fromagerie inventory --demand 12000 --order-cost 50000 --holding-cost 2000
    fromagerie --json queue --arrival 8 --service 10
    fromagerie run scenarios/cheese_plant.yaml --model inventory

Unset inputs take their values from --config, or the built-in defaults.
Set RUST_LOG=debug for diagnostic logs on stderr.
"
    );
}

/// Boxed title banner.
#[must_use]
pub fn format_banner(title: &str) -> String {
    let inner: usize = 63;
    let title = format!("  fromagerie - {title}");
    let pad = inner.saturating_sub(title.chars().count());
    format!(
        "╔{bar}╗\n║{title}{space}║\n╚{bar}╝\n",
        bar = "═".repeat(inner),
        space = " ".repeat(pad)
    )
}

/// Numbered menu.
#[must_use]
pub fn format_menu() -> String {
    let mut out = format_banner("Menu");
    for (i, kind) in ModelKind::ALL.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<26} fromagerie {}", i + 1, kind.label(), kind.command());
    }
    out
}

/// Print the menu.
pub fn print_menu() {
    print!("{}", format_menu());
}

/// Render a successful report in the configured format.
///
/// # Errors
///
/// Returns `Serialization` if JSON encoding fails.
pub fn format_report(report: &ModelReport, output: &OutputConfig) -> OpsResult<String> {
    if output.format == OutputFormat::Json {
        return format_json(report);
    }

    let mut out = format_banner(report.kind().label());
    out.push_str(&match report {
        ModelReport::Production(r) => format_production(r),
        ModelReport::Inventory(r) => format_inventory(r),
        ModelReport::Queueing(r) => format_queue(r),
        ModelReport::Seasonal(r) => format_seasonal(r),
    });

    if output.show_charts {
        let size = GridSize {
            width: output.chart_width,
            height: output.chart_height,
        };
        out.push('\n');
        out.push_str(&ascii::render(&Chart::from(report), size));
    }
    Ok(out)
}

/// Pretty JSON for a report.
///
/// # Errors
///
/// Returns `Serialization` if encoding fails.
pub fn format_json(report: &ModelReport) -> OpsResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| OpsError::serialization(e.to_string()))
}

/// Production summary.
#[must_use]
pub fn format_production(report: &ProductionReport) -> String {
    let plan = &report.plan;
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "✓ Optimal production: Cheese A = {:.2}, Cheese B = {:.2}", plan.x1, plan.x2);
    let _ = writeln!(out, "  Maximum profit: {}", group_thousands(plan.max_value));
    let _ = writeln!(out, "{RULE}\n");

    let _ = writeln!(out, "Objective: maximize {}·A + {}·B", report.request.profit_a, report.request.profit_b);
    let _ = writeln!(out, "Constraints:");
    for (i, (row, usage)) in report.request.constraints.iter().zip(&plan.usage).enumerate() {
        let name = if row.label.is_empty() {
            format!("#{}", i + 1)
        } else {
            row.label.clone()
        };
        let state = if usage.binding { "binding" } else { "slack" };
        let _ = writeln!(
            out,
            "  {name:<14} {}·A + {}·B ≤ {}   used {:.2}, slack {:.2} ({state})",
            row.x1, row.x2, row.limit, usage.used, usage.slack
        );
    }
    out
}

/// EOQ summary.
#[must_use]
pub fn format_inventory(report: &EoqReport) -> String {
    let r = &report.request;
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "✓ EOQ = {:.2} kg/order", report.eoq);
    let _ = writeln!(out, "{RULE}\n");
    let _ = writeln!(out, "  Annual demand (D):   {}", group_thousands(r.annual_demand));
    let _ = writeln!(out, "  Order cost (S):      {}", group_thousands(r.order_cost));
    let _ = writeln!(out, "  Holding cost (H):    {}", group_thousands(r.holding_cost));
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total annual cost:   {}", group_thousands(report.total_cost));
    let _ = writeln!(out, "    ordering:          {}", group_thousands(report.annual_ordering_cost));
    let _ = writeln!(out, "    holding:           {}", group_thousands(report.annual_holding_cost));
    let _ = writeln!(out, "  Orders per year:     {:.2}", report.orders_per_year);
    let _ = writeln!(out, "  Days between orders: {:.1}", report.cycle_days);
    out
}

/// M/M/1 summary.
#[must_use]
pub fn format_queue(report: &QueueReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "✓ Stable: λ = {} /h, μ = {} /h",
        report.request.arrival_rate, report.request.service_rate
    );
    let _ = writeln!(out, "{RULE}\n");
    let _ = writeln!(out, "  Utilization (ρ):              {:.2}", report.utilization);
    let _ = writeln!(out, "  Customers in system (L):      {:.2}", report.mean_in_system);
    let _ = writeln!(out, "  Time in system (W):           {:.2} h", report.mean_time_in_system);
    let _ = writeln!(out, "  Customers waiting (Lq):       {:.2}", report.mean_in_queue);
    let _ = writeln!(out, "  Wait before service (Wq):     {:.2} h", report.mean_wait_in_queue);
    let _ = writeln!(out, "  Server idle probability (P0): {:.2}", report.idle_probability);
    out
}

/// Seasonal summary.
#[must_use]
pub fn format_seasonal(series: &SeasonalSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Monthly cheese demand: 200 + 50·sin(2π·m/12)");
    let _ = writeln!(out, "{RULE}\n");
    for p in &series.points {
        let _ = writeln!(out, "  Month {:>2}: {:>7.2}", p.month, p.demand);
    }
    if let (Some(peak), Some(trough)) = (series.peak(), series.trough()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Peak:   month {} ({:.2})", peak.month, peak.demand);
        let _ = writeln!(out, "  Trough: month {} ({:.2})", trough.month, trough.demand);
    }
    let _ = writeln!(out, "  Annual total: {:.2}", series.annual_total());
    out
}

/// Explain why a calculator produced no result.
#[must_use]
pub fn format_rejection(kind: ModelKind, error: &OpsError) -> String {
    let headline = match error {
        OpsError::UnstableSystem { .. } => "⚠ Unstable system (λ ≥ μ)",
        OpsError::InfeasibleOrUnbounded(_) => "✗ No optimal production plan",
        OpsError::InvalidParameter { .. } => "✗ Invalid input",
        OpsError::DegenerateConstraint { .. } => "✗ Degenerate constraint",
        _ => "✗ Error",
    };
    format!("{}: {headline}\n  {error}\n", kind.label())
}

/// `1234567.8` → `1,234,568`.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 && rounded != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}
