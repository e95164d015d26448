#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use gaq9000::{
    cli::{self, RunMode},
    config::Config,
    setup_logging,
};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::parse_args();
    let mode = args.mode();

    // Setup logging; the interactive console owns the terminal
    setup_logging(
        args.debug,
        args.log_file.as_deref(),
        mode == RunMode::Interactive,
    )?;

    // Initialize configuration
    let config = Config::from_args(&args)?;

    // Run the console
    cli::execute_command(&config, mode, &args.exec)
}
