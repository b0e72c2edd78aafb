//! CLI module for fromagerie.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RowArg};
pub use commands::{evaluate_and_print, load_config, run_cli, run_scenario};
pub use output::{
    format_banner, format_inventory, format_json, format_menu, format_production, format_queue,
    format_rejection, format_report, format_seasonal, format_version, group_thousands, print_help,
    print_menu, print_version,
};

#[cfg(test)]
mod tests;
