//! # GAQ9000 Console
//!
//! A retro green-on-black console that mimics a shell prompt. It accepts a
//! handful of built-in commands (help, echo, dir, cd, pwd, time, date, ver,
//! clear, exit, a scripted greeting and a game-connect helper) and prints
//! their output inline.
//!
//! ## Features
//!
//! - Full-screen terminal UI with a protected prompt, history recall and
//!   tab completion
//! - Non-interactive `--exec` / `--batch` modes printing plain output
//! - Timed output driven by a single-threaded event loop
//!
//! ## Example
//!
//! ```no_run
//! use gaq9000::{config::Config, core::Shell};
//!
//! let mut shell = Shell::new(Config::default())?;
//! shell.execute("echo hello");
//! for line in shell.transcript().lines() {
//!     println!("{}", line.text);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod tui;
pub mod utils;

use anyhow::Result;
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{
    EnvFilter, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize logging with appropriate verbosity.
///
/// Logs go to `log_file` when given. Otherwise they go to stderr, except in
/// interactive mode where the terminal belongs to the console and logs are
/// discarded.
pub fn setup_logging(debug: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if interactive => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
