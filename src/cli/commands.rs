//! Mode implementations for the CLI

use crate::{
    cli::RunMode,
    config::Config,
    core::{Line, Shell},
    tui,
};
use anyhow::Context;
use std::{
    io::{self, BufRead, Write},
    thread,
    time::Instant,
};
use tracing::{debug, info, instrument};

/// Execute the console in the requested mode
#[instrument(skip(config, exec))]
pub fn execute_command(config: &Config, mode: RunMode, exec: &[String]) -> anyhow::Result<()> {
    match mode {
        RunMode::Interactive => tui::run(config),
        RunMode::Exec => {
            let stdout = io::stdout();
            run_lines(config, exec.iter().cloned().map(Ok), &mut stdout.lock())
        }
        RunMode::Batch => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_lines(config, stdin.lock().lines(), &mut stdout.lock())
        }
    }
}

/// Run command lines without the terminal UI, writing plain output to `out`.
/// Stops at `exit`. Pending timed output is waited for until the quit
/// sequence completes.
pub fn run_lines<I, W>(config: &Config, lines: I, out: &mut W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut shell = Shell::new(config.clone()).context("Failed to start the shell")?;
    flush_output(&mut shell, out)?;

    for line in lines {
        let line = line.context("Failed to read command line")?;
        debug!("Running line: {}", line);

        shell.execute(&line);
        shell.tick(Instant::now());
        flush_output(&mut shell, out)?;

        if shell.exit_requested() {
            info!("exit requested, skipping remaining lines");
            break;
        }
    }

    // Nothing scheduled runs once the quit has fired.
    while !shell.should_quit() {
        let Some(deadline) = shell.next_deadline() else {
            break;
        };
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        shell.tick(Instant::now());
        flush_output(&mut shell, out)?;
    }

    if !shell.status().is_empty() {
        info!("{}", shell.status());
    }
    Ok(())
}

fn flush_output<W: Write>(shell: &mut Shell, out: &mut W) -> anyhow::Result<()> {
    for Line { text, .. } in shell.transcript_mut().take_pending() {
        writeln!(out, "{text}").context("Failed to write output")?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}
