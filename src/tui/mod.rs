//! TUI module for fromagerie.
//!
//! Application state and key handling for the `fromagerie-tui` binary,
//! kept in the library so it can be tested without a terminal. The
//! binary only draws this state and forwards key presses.

pub mod dashboard_app;

pub use dashboard_app::{DashboardApp, InputField};
