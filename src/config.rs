//! Configuration management for the console
//!
//! Centralizes configuration options and provides validation.

use crate::{
    cli::{Args, RunMode},
    error::ConsoleError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Optional log file
    pub log_file: Option<PathBuf>,
    /// Directory the shell starts in
    pub start_dir: PathBuf,
    /// Text written in front of every input line
    pub prompt: String,
    /// Terminal title
    pub title: String,
    /// Print the banner at start-up and after clearing
    pub show_banner: bool,
    /// Number of entered lines kept for recall
    pub history_limit: usize,
    /// Number of transcript lines kept on screen
    pub scrollback_limit: usize,
    /// Delay between an exit request and the actual quit
    pub close_delay_ms: u64,
    /// Lines played by the `comunicate` command
    pub greeting: Vec<GreetingLine>,
    /// Game client configuration
    pub launcher: LauncherConfig,
    /// Console colors
    pub theme: ThemeConfig,
}

/// One line of the greeting sequence and the pause that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingLine {
    pub text: String,
    pub delay_ms: u64,
}

/// Game client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Server handed to the client as `+connect`
    pub server: String,
    /// Steam application id of the game
    pub app_id: u32,
    /// Image name killed before relaunching
    pub game_process: String,
}

/// Console colors as `#RRGGBB`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub fg: String,
    pub bg: String,
    pub dim: String,
    pub error: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_file: None,
            start_dir: PathBuf::from("."),
            prompt: "> ".to_string(),
            title: "GAQ9000 Console".to_string(),
            show_banner: true,
            history_limit: 200,
            scrollback_limit: 5000,
            close_delay_ms: 250,
            greeting: default_greeting(),
            launcher: LauncherConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            server: "169.150.249.133:22912".to_string(),
            app_id: 440,
            game_process: "hl2.exe".to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: "#00ff66".to_string(),
            bg: "#0a0f0a".to_string(),
            dim: "#00aa44".to_string(),
            error: "#ff5555".to_string(),
        }
    }
}

fn default_greeting() -> Vec<GreetingLine> {
    [
        ("oh Hi hello :D", 500),
        ("oh Hi hello :D", 2000),
        ("Very very good morning", 500),
        ("Spave", 200),
        ("Very very good morning", 500),
    ]
    .into_iter()
    .map(|(text, delay_ms)| GreetingLine {
        text: text.to_string(),
        delay_ms,
    })
    .collect()
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ConsoleError> {
        let cwd = std::env::current_dir().map_err(|e| {
            ConsoleError::config(format!("Cannot determine current directory: {e}"))
        })?;

        let start_dir = match &args.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        let mut config = Self {
            debug: args.debug,
            log_file: args.log_file.clone(),
            start_dir: crate::utils::fs::normalize_path(&start_dir),
            show_banner: args.mode() == RunMode::Interactive,
            ..Self::default()
        };

        if let Some(server) = &args.server {
            config.launcher.server = server.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if !self.start_dir.is_dir() {
            return Err(ConsoleError::validation(format!(
                "Start directory not found: {}",
                self.start_dir.display()
            )));
        }

        if self.history_limit == 0 {
            return Err(ConsoleError::validation("History limit must be positive"));
        }

        if self.scrollback_limit == 0 {
            return Err(ConsoleError::validation("Scrollback limit must be positive"));
        }

        match self.launcher.server.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
            _ => {
                return Err(ConsoleError::validation(format!(
                    "Server must look like HOST:PORT, got '{}'",
                    self.launcher.server
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.history_limit, 200);
        assert_eq!(config.close_delay_ms, 250);
        assert_eq!(config.greeting.len(), 5);
        assert_eq!(config.greeting[1].delay_ms, 2000);
        assert_eq!(config.launcher.app_id, 440);
    }

    #[test]
    fn test_from_args_with_dir_and_server() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();
        let args = Args::try_parse_from([
            "gaq9000",
            "--dir",
            dir.as_str(),
            "--server",
            "127.0.0.1:27015",
            "-e",
            "pwd",
        ])
        .unwrap();

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.start_dir, temp_dir.path());
        assert_eq!(config.launcher.server, "127.0.0.1:27015");
        assert!(!config.show_banner);
    }

    #[test]
    fn test_from_args_rejects_missing_dir() {
        let args =
            Args::try_parse_from(["gaq9000", "--dir", "/definitely/not/here/12345"]).unwrap();
        assert!(matches!(
            Config::from_args(&args),
            Err(ConsoleError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_server_format() {
        let mut config = Config {
            start_dir: std::env::temp_dir(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.launcher.server = "no-port".to_string();
        assert!(config.validate().is_err());

        config.launcher.server = "host:notaport".to_string();
        assert!(config.validate().is_err());
    }
}
