//! Game client hand-off used by `cge.connect`
//!
//! Closes a running game and relaunches it through the Steam client with a
//! `+connect` argument.

use crate::{
    config::LauncherConfig,
    error::{ConsoleError, Result},
    utils::{EnvUtils, FileSystemUtils, ProcessRunner},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Result of a launch attempt that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The client was started
    Launched { client: PathBuf },
    /// No client executable could be found
    ClientNotFound,
}

/// The operations `cge.connect` needs from the platform
pub trait GameLauncher {
    /// Whether the hand-off is available on this platform
    fn is_supported(&self) -> bool;

    /// Stop a running game. Not running is not an error.
    fn close_game(&self) -> Result<()>;

    /// Start the client, asking it to connect to `server`
    fn connect(&self, server: &str, cwd: &Path) -> Result<LaunchOutcome>;
}

/// Launches the game through the Steam client
#[derive(Debug)]
pub struct SteamLauncher {
    config: LauncherConfig,
    runner: ProcessRunner,
    fs_utils: FileSystemUtils,
}

impl SteamLauncher {
    pub fn new(config: LauncherConfig, debug: bool) -> Self {
        Self {
            config,
            runner: ProcessRunner::new(debug),
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Find the client executable
    #[instrument(skip(self))]
    pub fn locate_client(&self) -> Option<PathBuf> {
        if !cfg!(windows) {
            return self
                .runner
                .command_exists("steam")
                .then(|| PathBuf::from("steam"));
        }

        let candidates = client_candidates(EnvUtils::get_non_empty);
        let found = candidates
            .into_iter()
            .find(|candidate| self.fs_utils.is_file(candidate));
        debug!("Steam client lookup: {:?}", found);
        found
    }

    /// Arguments passed to the client
    pub fn launch_args(&self, server: &str) -> Vec<String> {
        vec![
            "-applaunch".to_string(),
            self.config.app_id.to_string(),
            format!("+connect {server}"),
        ]
    }
}

impl GameLauncher for SteamLauncher {
    fn is_supported(&self) -> bool {
        cfg!(windows)
    }

    #[instrument(skip(self))]
    fn close_game(&self) -> Result<()> {
        let image = self.config.game_process.as_str();
        match self
            .runner
            .run_command_with_output("taskkill", &["/IM", image, "/F"])
        {
            Ok(result) => {
                info!("Closed {}: {}", image, result.stdout.trim());
                if !result.stderr.trim().is_empty() {
                    debug!("taskkill stderr: {}", result.stderr.trim());
                }
                Ok(())
            }
            Err(ConsoleError::Process {
                exit_code: Some(code),
                ..
            }) => {
                debug!("taskkill exited with {} ({} not running?)", code, image);
                Ok(())
            }
            Err(e) => {
                warn!("Could not run taskkill: {}", e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    fn connect(&self, server: &str, cwd: &Path) -> Result<LaunchOutcome> {
        let Some(client) = self.locate_client() else {
            warn!("Steam client not found");
            return Ok(LaunchOutcome::ClientNotFound);
        };

        let args = self.launch_args(server);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.spawn_detached(&client, &args, cwd)?;

        info!("Launched {} towards {}", client.display(), server);
        Ok(LaunchOutcome::Launched { client })
    }
}

/// Candidate client locations in lookup order: `STEAM_EXE`, `STEAM_PATH`,
/// then the usual install folders.
pub fn client_candidates<F>(lookup: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let mut candidates: Vec<PathBuf> = ["STEAM_EXE", "STEAM_PATH"]
        .into_iter()
        .filter_map(|key| lookup(key).map(PathBuf::from))
        .collect();

    let program_files_x86 =
        lookup("PROGRAMFILES(X86)").unwrap_or_else(|| r"C:\Program Files (x86)".to_string());
    let program_files =
        lookup("PROGRAMFILES").unwrap_or_else(|| r"C:\Program Files".to_string());

    candidates.push(PathBuf::from(program_files_x86).join("Steam").join("steam.exe"));
    candidates.push(PathBuf::from(program_files).join("Steam").join("steam.exe"));
    candidates.push(PathBuf::from(r"C:\Steam\steam.exe"));
    candidates
}
