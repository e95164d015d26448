//! Command-line argument parsing and validation

use clap::Parser;
use std::path::PathBuf;

/// GAQ9000 - a retro green-on-black console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "gaq9000")]
pub struct Args {
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Write logs to this file (interactive mode discards logs otherwise)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory the console starts in
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Server address used by cge.connect
    #[arg(long, value_name = "HOST:PORT")]
    pub server: Option<String>,

    /// Run a command line without the interactive console (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "LINE")]
    pub exec: Vec<String>,

    /// Read command lines from stdin without the interactive console
    #[arg(long, conflicts_with = "exec")]
    pub batch: bool,
}

/// How the console is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Full-screen terminal UI
    Interactive,
    /// Lines given with `--exec`
    Exec,
    /// Lines read from stdin
    Batch,
}

impl Args {
    /// Select the run mode from the flags
    pub fn mode(&self) -> RunMode {
        if self.batch {
            RunMode::Batch
        } else if !self.exec.is_empty() {
            RunMode::Exec
        } else {
            RunMode::Interactive
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
