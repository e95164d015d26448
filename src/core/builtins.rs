//! The command table and its handlers
//!
//! Lookup is a linear scan over names and aliases; table order is the order
//! of `help` and of completion candidates.

use crate::{
    core::{
        launcher::LaunchOutcome,
        shell::Shell,
        timeline::TimedAction,
        transcript::LineStyle,
    },
    error::Result,
};
use chrono::Local;
use std::time::{Duration, Instant};
use tracing::debug;

/// Signature shared by all command handlers
pub type Handler = fn(&mut Shell, &[String]) -> Result<()>;

/// One entry of the command table
pub struct Builtin {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
    pub run: Handler,
}

impl Builtin {
    fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

pub static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "help",
        aliases: &[],
        usage: "help",
        summary: "Show this help",
        run: cmd_help,
    },
    Builtin {
        name: "clear",
        aliases: &["cls"],
        usage: "clear | cls",
        summary: "Clear the screen",
        run: cmd_clear,
    },
    Builtin {
        name: "echo",
        aliases: &[],
        usage: "echo <text>",
        summary: "Print text",
        run: cmd_echo,
    },
    Builtin {
        name: "dir",
        aliases: &[],
        usage: "dir [path]",
        summary: "List directory",
        run: cmd_dir,
    },
    Builtin {
        name: "cd",
        aliases: &[],
        usage: "cd [path]",
        summary: "Change directory",
        run: cmd_cd,
    },
    Builtin {
        name: "pwd",
        aliases: &[],
        usage: "pwd",
        summary: "Show current directory",
        run: cmd_pwd,
    },
    Builtin {
        name: "time",
        aliases: &[],
        usage: "time",
        summary: "Show current time",
        run: cmd_time,
    },
    Builtin {
        name: "date",
        aliases: &[],
        usage: "date",
        summary: "Show current date",
        run: cmd_date,
    },
    Builtin {
        name: "ver",
        aliases: &[],
        usage: "ver",
        summary: "Show version info",
        run: cmd_ver,
    },
    Builtin {
        name: "exit",
        aliases: &[],
        usage: "exit",
        summary: "Close the console",
        run: cmd_exit,
    },
    Builtin {
        name: "comunicate",
        aliases: &[],
        usage: "comunicate",
        summary: "Play the greeting sequence",
        run: cmd_comunicate,
    },
    Builtin {
        name: "cge.connect",
        aliases: &[],
        usage: "cge.connect",
        summary: "Close TF2 and connect via Steam with +connect",
        run: cmd_cge_connect,
    },
];

/// Find the entry answering to `name` (already lowercased)
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.names().any(|candidate| candidate == name))
}

/// Command names and aliases starting with `fragment`, in table order
pub fn completions(fragment: &str) -> Vec<&'static str> {
    BUILTINS
        .iter()
        .flat_map(Builtin::names)
        .filter(|name| name.starts_with(fragment))
        .collect()
}

fn cmd_help(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.write("Available commands:", LineStyle::Dim);
    for builtin in BUILTINS {
        shell.write(
            &format!("  {:<18}{}", builtin.usage, builtin.summary),
            LineStyle::Normal,
        );
    }
    Ok(())
}

fn cmd_clear(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.clear_screen();
    Ok(())
}

fn cmd_echo(shell: &mut Shell, args: &[String]) -> Result<()> {
    shell.write(&args.join(" "), LineStyle::Normal);
    Ok(())
}

fn cmd_dir(shell: &mut Shell, args: &[String]) -> Result<()> {
    let path = match args.first() {
        Some(arg) => shell.resolve_path(arg),
        None => shell.cwd().to_path_buf(),
    };

    if !shell.fs_utils().is_dir(&path) {
        shell.write_error(&format!("Not a directory: {}", path.display()));
        return Ok(());
    }

    shell.write(&format!(" Directory of {}", path.display()), LineStyle::Dim);

    let entries = match shell.fs_utils().list_dir(&path) {
        Ok(entries) => entries,
        Err(e) if e.is_permission_denied() => {
            shell.write_error("Access denied.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    for entry in &entries {
        let marker = if entry.is_dir { "<DIR>" } else { "" };
        shell.write(&format!("{marker:>5}  {}", entry.name), LineStyle::Normal);
    }
    shell.write(&format!("   {} item(s)", entries.len()), LineStyle::Dim);
    Ok(())
}

fn cmd_cd(shell: &mut Shell, args: &[String]) -> Result<()> {
    let Some(arg) = args.first() else {
        let cwd = shell.cwd().display().to_string();
        shell.write(&cwd, LineStyle::Normal);
        return Ok(());
    };

    let target = shell.resolve_path(arg);
    if !shell.fs_utils().is_dir(&target) {
        shell.write_error("Path not found.");
        return Ok(());
    }

    match shell.fs_utils().check_enterable(&target) {
        Ok(()) => {
            shell.set_cwd(target);
            Ok(())
        }
        Err(e) if e.is_permission_denied() => {
            shell.write_error("Access denied.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn cmd_pwd(shell: &mut Shell, _args: &[String]) -> Result<()> {
    let cwd = shell.cwd().display().to_string();
    shell.write(&cwd, LineStyle::Normal);
    Ok(())
}

fn cmd_time(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.write(&Local::now().format("%H:%M:%S").to_string(), LineStyle::Normal);
    Ok(())
}

fn cmd_date(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.write(&Local::now().format("%Y-%m-%d").to_string(), LineStyle::Normal);
    Ok(())
}

fn cmd_ver(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.write(
        &format!("GAQ9000 Console v{}", env!("CARGO_PKG_VERSION")),
        LineStyle::Normal,
    );
    shell.write(
        &format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        LineStyle::Normal,
    );
    Ok(())
}

fn cmd_exit(shell: &mut Shell, _args: &[String]) -> Result<()> {
    shell.request_exit();
    Ok(())
}

/// Print the first greeting line now and each following one after the
/// previous line's pause
fn cmd_comunicate(shell: &mut Shell, _args: &[String]) -> Result<()> {
    let greeting = shell.config().greeting.clone();
    let Some((first, rest)) = greeting.split_first() else {
        return Ok(());
    };

    shell.write(&first.text, LineStyle::Normal);

    let start = Instant::now();
    let mut offset = Duration::from_millis(first.delay_ms);
    for line in rest {
        debug!("Greeting line due in {:?}", offset);
        shell.schedule(start + offset, TimedAction::Print(line.text.clone()));
        offset += Duration::from_millis(line.delay_ms);
    }
    Ok(())
}

fn cmd_cge_connect(shell: &mut Shell, _args: &[String]) -> Result<()> {
    if !shell.launcher().is_supported() {
        shell.write_error("cge.connect is supported on Windows only.");
        return Ok(());
    }

    if let Err(e) = shell.launcher().close_game() {
        shell.write_error(&format!("Warning while closing TF2: {e}"));
    }

    let server = shell.config().launcher.server.clone();
    shell.write(&format!("Connecting to {server}..."), LineStyle::Dim);

    let cwd = shell.cwd().to_path_buf();
    match shell.launcher().connect(&server, &cwd) {
        Ok(LaunchOutcome::Launched { .. }) => {
            shell.set_status(format!("Launching TF2 via Steam to {server}..."));
        }
        Ok(LaunchOutcome::ClientNotFound) => {
            shell.set_status("Steam not found. Please ensure Steam is installed.");
            shell.write_error("Steam or TF2 not found. Please install Steam and Team Fortress 2.");
        }
        Err(e) => {
            shell.set_status(format!("Error launching TF2: {e}"));
            shell.write_error(&format!("Error launching TF2: {e}"));
        }
    }
    Ok(())
}
