//! Core console functionality
//!
//! The shell engine: command table, tokenizing, history, the prompt line,
//! transcript, timed actions and the game client hand-off.

pub mod builtins;
pub mod history;
pub mod launcher;
pub mod prompt;
pub mod shell;
pub mod timeline;
pub mod tokenizer;
pub mod transcript;

pub use launcher::{GameLauncher, LaunchOutcome, SteamLauncher};
pub use shell::Shell;
pub use transcript::{Line, LineStyle};
