//! CLI argument parsing.
//!
//! Hand-rolled so parsing can be exercised from tests with any iterator of
//! strings. A malformed command line falls back to `help` and keeps the
//! problem in [`Args::usage_error`] so the caller can report it.

use std::path::PathBuf;

use crate::models::ModelKind;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// Scenario file supplying default inputs (`--config`).
    pub config_path: Option<PathBuf>,
    /// Emit JSON instead of text (`--json`).
    pub json: bool,
    /// Suppress the text chart (`--no-chart`).
    pub no_chart: bool,
    /// Why the command line was rejected, if it was.
    pub usage_error: Option<String>,
}

/// Constraint row given on the command line as `a,b,limit`.
pub type RowArg = (f64, f64, f64);

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// Production LP; unset values come from the scenario.
    Production {
        /// Profit per unit of cheese A.
        profit_a: Option<f64>,
        /// Profit per unit of cheese B.
        profit_b: Option<f64>,
        /// First constraint row.
        row1: Option<RowArg>,
        /// Second constraint row.
        row2: Option<RowArg>,
    },
    /// EOQ model.
    Inventory {
        /// Annual demand D.
        demand: Option<f64>,
        /// Cost per order S.
        order_cost: Option<f64>,
        /// Holding cost H.
        holding_cost: Option<f64>,
    },
    /// M/M/1 queue.
    Queue {
        /// Arrival rate λ.
        arrival: Option<f64>,
        /// Service rate μ.
        service: Option<f64>,
    },
    /// Seasonal demand series.
    Seasonal,
    /// Evaluate calculators from a scenario file.
    Run {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Restrict to one calculator.
        model: Option<ModelKind>,
    },
    /// List the menu.
    Menu,
    /// Show help
    #[default]
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        let mut parsed = Self::default();

        // Global flags may appear anywhere; strip them before dispatch.
        let mut rest = Vec::with_capacity(args.len());
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--json" => parsed.json = true,
                "--no-chart" => parsed.no_chart = true,
                "--config" => {
                    let Some(path) = args.get(i + 1) else {
                        return Self {
                            usage_error: Some("'--config' requires a file path".to_string()),
                            ..Self::default()
                        };
                    };
                    parsed.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                other => rest.push(other.to_string()),
            }
            i += 1;
        }

        let Some(name) = rest.first() else {
            return parsed;
        };

        let command = match name.as_str() {
            "production" | "lp" => Self::parse_production(&rest[1..]),
            "inventory" | "eoq" => Self::parse_inventory(&rest[1..]),
            "queue" | "queueing" | "mm1" => Self::parse_queue(&rest[1..]),
            "seasonal" | "demand" => Ok(Command::Seasonal),
            "run" => Self::parse_run(&rest[1..]),
            "menu" => Ok(Command::Menu),
            "-h" | "--help" | "help" => Ok(Command::Help),
            "-V" | "--version" | "version" => Ok(Command::Version),
            unknown => Err(format!("Unknown command: {unknown}")),
        };

        match command {
            Ok(command) => parsed.command = command,
            Err(message) => {
                parsed.command = Command::Help;
                parsed.usage_error = Some(message);
            }
        }
        parsed
    }

    fn parse_production(args: &[String]) -> Result<Command, String> {
        let (mut profit_a, mut profit_b, mut row1, mut row2) = (None, None, None, None);
        for (flag, value) in flag_pairs(args)? {
            match flag {
                "--profit-a" | "--a1" => profit_a = Some(parse_number(flag, value)?),
                "--profit-b" | "--a2" => profit_b = Some(parse_number(flag, value)?),
                "--row1" => row1 = Some(parse_row(flag, value)?),
                "--row2" => row2 = Some(parse_row(flag, value)?),
                other => return Err(format!("'production' does not accept {other}")),
            }
        }
        Ok(Command::Production {
            profit_a,
            profit_b,
            row1,
            row2,
        })
    }

    fn parse_inventory(args: &[String]) -> Result<Command, String> {
        let (mut demand, mut order_cost, mut holding_cost) = (None, None, None);
        for (flag, value) in flag_pairs(args)? {
            match flag {
                "--demand" | "-D" => demand = Some(parse_number(flag, value)?),
                "--order-cost" | "-S" => order_cost = Some(parse_number(flag, value)?),
                "--holding-cost" | "-H" => holding_cost = Some(parse_number(flag, value)?),
                other => return Err(format!("'inventory' does not accept {other}")),
            }
        }
        Ok(Command::Inventory {
            demand,
            order_cost,
            holding_cost,
        })
    }

    fn parse_queue(args: &[String]) -> Result<Command, String> {
        let (mut arrival, mut service) = (None, None);
        for (flag, value) in flag_pairs(args)? {
            match flag {
                "--arrival" | "--lambda" => arrival = Some(parse_number(flag, value)?),
                "--service" | "--mu" => service = Some(parse_number(flag, value)?),
                other => return Err(format!("'queue' does not accept {other}")),
            }
        }
        Ok(Command::Queue { arrival, service })
    }

    fn parse_run(args: &[String]) -> Result<Command, String> {
        let Some((path, options)) = args.split_first() else {
            return Err("'run' command requires a scenario path".to_string());
        };

        let mut model = None;
        for (flag, value) in flag_pairs(options)? {
            match flag {
                "--model" => {
                    model = Some(
                        ModelKind::from_command(value)
                            .ok_or_else(|| format!("unknown model '{value}'"))?,
                    );
                }
                other => return Err(format!("'run' does not accept {other}")),
            }
        }

        Ok(Command::Run {
            scenario_path: PathBuf::from(path),
            model,
        })
    }
}

/// Pair each `--flag` with the value that follows it.
fn flag_pairs(args: &[String]) -> Result<Vec<(&str, &str)>, String> {
    if args.len() % 2 != 0 {
        return Err(format!("missing value after {}", args[args.len() - 1]));
    }
    Ok(args
        .chunks_exact(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect())
}

fn parse_number(flag: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{flag} expects a number, got '{value}'"))
}

fn parse_row(flag: &str, value: &str) -> Result<RowArg, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let [a, b, limit] = parts.as_slice() else {
        return Err(format!("{flag} expects 'a,b,limit', got '{value}'"));
    };
    Ok((
        parse_number(flag, a)?,
        parse_number(flag, b)?,
        parse_number(flag, limit)?,
    ))
}
