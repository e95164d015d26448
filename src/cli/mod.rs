//! Command-line interface module
//!
//! Provides argument parsing and mode execution.

pub mod args;
pub mod commands;

pub use args::{Args, RunMode, parse_args};
pub use commands::{execute_command, run_lines};
