//! The console's shell state and command dispatch
//!
//! `Shell` owns everything the console shows and edits: the transcript, the
//! prompt line, history, the working directory, the status line and pending
//! timed actions. Frontends feed it key-level operations and render its state.

use crate::{
    config::Config,
    core::{
        builtins,
        history::{History, Recall},
        launcher::{GameLauncher, SteamLauncher},
        prompt::PromptLine,
        timeline::{TimedAction, Timeline},
        tokenizer::split_args,
        transcript::{LineStyle, Transcript},
    },
    error::Result,
    utils::{FileSystemUtils, PathExpander, fs::normalize_path},
};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing::{debug, info, instrument, warn};

pub const BANNER: &str = r#"  ________    _____   ________  ________
 /  _____/   /  _  \  \_____  \/   __   \
/   \  ___  /  /_\  \  /  / \  \____    /
\    \_\  \/    |    \/   \_/.  \ /    /
 \______  /\____|__  /\_____\ \_//____/  v0.1
        \/         \/        \__>

              GAQ9000 - type "help" to get started
"#;

pub struct Shell {
    config: Config,
    cwd: PathBuf,
    history: History,
    transcript: Transcript,
    input: PromptLine,
    timeline: Timeline,
    status: String,
    launcher: Box<dyn GameLauncher>,
    fs_utils: FileSystemUtils,
    expander: PathExpander,
    should_quit: bool,
}

impl Shell {
    /// Create a shell that launches games through Steam
    pub fn new(config: Config) -> Result<Self> {
        let launcher = SteamLauncher::new(config.launcher.clone(), config.debug);
        Self::with_launcher(config, Box::new(launcher))
    }

    pub fn with_launcher(config: Config, launcher: Box<dyn GameLauncher>) -> Result<Self> {
        let mut shell = Self {
            cwd: config.start_dir.clone(),
            history: History::new(config.history_limit),
            transcript: Transcript::new(config.scrollback_limit),
            input: PromptLine::new(),
            timeline: Timeline::new(),
            status: String::new(),
            launcher,
            fs_utils: FileSystemUtils::new(),
            expander: PathExpander::new()?,
            should_quit: false,
            config,
        };

        if shell.config.show_banner {
            shell.write_banner();
        }
        Ok(shell)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn input(&self) -> &PromptLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PromptLine {
        &mut self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the quit sequence has started
    pub fn exit_requested(&self) -> bool {
        self.should_quit || self.timeline.contains(&TimedAction::Quit)
    }

    /// Run the current input: echo it, execute it and remember it
    #[instrument(skip(self))]
    pub fn submit(&mut self) {
        let line = self.input.take();
        let echo = format!("{}{}", self.config.prompt, line);
        self.write(&echo, LineStyle::Prompt);

        self.execute(&line);
        self.history.record(&line);
    }

    /// Execute one command line. Handler failures become an error line.
    pub fn execute(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let mut words = split_args(line);
        let name = words.remove(0).to_lowercase();

        let Some(builtin) = builtins::lookup(&name) else {
            debug!("Unknown command: {}", name);
            self.write_error(&format!("'{name}' is not recognized."));
            return;
        };

        info!("Executing {} with {} argument(s)", builtin.name, words.len());
        if let Err(e) = (builtin.run)(self, &words) {
            warn!("{} failed: {}", builtin.name, e);
            self.write_error(&format!("Error: {e}"));
        }
    }

    /// Replace the input with an older history line. False means bell.
    pub fn recall_previous(&mut self) -> bool {
        match self.history.previous() {
            Some(line) => {
                self.input.replace(line);
                true
            }
            None => false,
        }
    }

    /// Replace the input with a newer history line. False means bell.
    pub fn recall_next(&mut self) -> bool {
        match self.history.next() {
            Some(Recall::Line(line)) => {
                self.input.replace(line);
                true
            }
            Some(Recall::Blank) => {
                self.input.replace("");
                true
            }
            None => false,
        }
    }

    /// Complete the input against the command table. False means bell.
    pub fn complete(&mut self) -> bool {
        let fragment = self.input.text().trim().to_string();
        let matches = builtins::completions(&fragment);

        match matches.as_slice() {
            [] => false,
            [only] => {
                self.input.replace(&format!("{only} "));
                true
            }
            _ => {
                let echo = format!("{}{}", self.config.prompt, self.input.text());
                self.write(&echo, LineStyle::Prompt);
                self.write(&matches.join("\n"), LineStyle::Normal);
                self.input.replace(&fragment);
                true
            }
        }
    }

    /// Wipe the transcript and show the banner again
    pub fn clear_screen(&mut self) {
        self.transcript.clear();
        if self.config.show_banner {
            self.write_banner();
        }
    }

    /// Start the quit sequence; repeated requests do not stack
    pub fn request_exit(&mut self) {
        if self.exit_requested() {
            return;
        }
        let delay = Duration::from_millis(self.config.close_delay_ms);
        debug!("Quitting in {:?}", delay);
        self.timeline.schedule(Instant::now() + delay, TimedAction::Quit);
    }

    /// Run every timed action due at `now`, in due order. Actions due after
    /// the quit are dropped.
    pub fn tick(&mut self, now: Instant) {
        for action in self.timeline.drain_due(now) {
            match action {
                TimedAction::Print(text) => self.write(&text, LineStyle::Normal),
                TimedAction::Quit => {
                    info!("Quit sequence finished");
                    self.should_quit = true;
                    break;
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_deadline()
    }

    pub(crate) fn schedule(&mut self, due: Instant, action: TimedAction) {
        self.timeline.schedule(due, action);
    }

    pub fn write(&mut self, text: &str, style: LineStyle) {
        self.transcript.write(text, style);
    }

    pub fn write_error(&mut self, text: &str) {
        self.transcript.write(text, LineStyle::Error);
    }

    fn write_banner(&mut self) {
        self.transcript.write(BANNER, LineStyle::Banner);
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub(crate) fn set_cwd(&mut self, cwd: PathBuf) {
        info!("Working directory is now {}", cwd.display());
        self.cwd = cwd;
    }

    pub(crate) fn launcher(&self) -> &dyn GameLauncher {
        self.launcher.as_ref()
    }

    pub(crate) fn fs_utils(&self) -> &FileSystemUtils {
        &self.fs_utils
    }

    /// Expand variables and `~`, anchor relative paths at the working
    /// directory and normalize the result
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = PathBuf::from(self.expander.expand(raw));
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };
        normalize_path(&absolute)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::launcher::LaunchOutcome;
    use std::{cell::RefCell, fs, rc::Rc};
    use tempfile::TempDir;

    /// Records launcher calls instead of touching processes
    #[derive(Default)]
    pub(crate) struct FakeLauncher {
        pub supported: bool,
        pub client_found: bool,
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl GameLauncher for FakeLauncher {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn close_game(&self) -> Result<()> {
            self.calls.borrow_mut().push("close".to_string());
            Ok(())
        }

        fn connect(&self, server: &str, _cwd: &Path) -> Result<LaunchOutcome> {
            self.calls.borrow_mut().push(format!("connect {server}"));
            if self.client_found {
                Ok(LaunchOutcome::Launched {
                    client: PathBuf::from("steam.exe"),
                })
            } else {
                Ok(LaunchOutcome::ClientNotFound)
            }
        }
    }

    pub(crate) fn test_config(dir: &Path) -> Config {
        Config {
            start_dir: dir.to_path_buf(),
            show_banner: false,
            ..Config::default()
        }
    }

    pub(crate) fn test_shell(dir: &Path) -> Shell {
        Shell::with_launcher(test_config(dir), Box::new(FakeLauncher::default())).unwrap()
    }

    pub(crate) fn output(shell: &mut Shell) -> Vec<(String, LineStyle)> {
        shell
            .transcript_mut()
            .take_pending()
            .into_iter()
            .map(|line| (line.text, line.style))
            .collect()
    }

    pub(crate) fn texts(shell: &mut Shell) -> Vec<String> {
        output(shell).into_iter().map(|(text, _)| text).collect()
    }

    #[test]
    fn test_unknown_command_is_not_recognized() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        for line in ["frobnicate", "FOO bar", "''", "echo2"] {
            shell.execute(line);
        }

        let lines = output(&mut shell);
        assert_eq!(
            lines,
            vec![
                ("'frobnicate' is not recognized.".to_string(), LineStyle::Error),
                ("'foo' is not recognized.".to_string(), LineStyle::Error),
                ("'' is not recognized.".to_string(), LineStyle::Error),
                ("'echo2' is not recognized.".to_string(), LineStyle::Error),
            ]
        );
    }

    #[test]
    fn test_blank_line_does_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.execute("   ");
        assert!(output(&mut shell).is_empty());
    }

    #[test]
    fn test_command_name_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.execute("ECHO Loud");
        assert_eq!(texts(&mut shell), vec!["Loud"]);
    }

    #[test]
    fn test_submit_echoes_and_records() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.input_mut().replace("echo hi");
        shell.submit();

        assert_eq!(
            output(&mut shell),
            vec![
                ("> echo hi".to_string(), LineStyle::Prompt),
                ("hi".to_string(), LineStyle::Normal),
            ]
        );
        assert!(shell.input().is_empty());
        assert_eq!(shell.history().entries().collect::<Vec<_>>(), vec!["echo hi"]);
    }

    #[test]
    fn test_history_recall_replaces_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        assert!(!shell.recall_previous());
        assert!(!shell.recall_next());

        for line in ["echo a", "echo b"] {
            shell.input_mut().replace(line);
            shell.submit();
        }

        shell.input_mut().replace("draft");
        assert!(shell.recall_previous());
        assert_eq!(shell.input().text(), "echo b");
        assert!(shell.recall_previous());
        assert_eq!(shell.input().text(), "echo a");
        assert!(shell.recall_next());
        assert_eq!(shell.input().text(), "echo b");
        assert!(shell.recall_next());
        assert_eq!(shell.input().text(), "");
        assert!(!shell.recall_next());
    }

    #[test]
    fn test_complete_single_match() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.input_mut().replace("  ec");
        assert!(shell.complete());
        assert_eq!(shell.input().text(), "echo ");
        assert!(output(&mut shell).is_empty());
    }

    #[test]
    fn test_complete_many_matches_lists_them() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.input_mut().replace("c");
        assert!(shell.complete());

        assert_eq!(
            texts(&mut shell),
            vec!["> c", "clear", "cls", "cd", "comunicate", "cge.connect"]
        );
        assert_eq!(shell.input().text(), "c");
    }

    #[test]
    fn test_complete_without_match_rings() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.input_mut().replace("zz");
        assert!(!shell.complete());
        assert_eq!(shell.input().text(), "zz");
    }

    #[test]
    fn test_request_exit_quits_after_delay() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        let before = Instant::now();
        shell.request_exit();
        shell.request_exit();
        assert!(shell.exit_requested());
        assert!(!shell.should_quit());

        let deadline = shell.next_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(250));

        shell.tick(before);
        assert!(!shell.should_quit());
        shell.tick(deadline);
        assert!(shell.should_quit());
        assert!(shell.next_deadline().is_none());
    }

    #[test]
    fn test_output_due_after_quit_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());

        shell.request_exit();
        let quit_at = shell.next_deadline().unwrap();
        shell.schedule(Instant::now(), TimedAction::Print("before".to_string()));
        shell.schedule(quit_at + Duration::from_millis(1), TimedAction::Print("late".to_string()));

        shell.tick(quit_at + Duration::from_secs(1));
        assert!(shell.should_quit());
        assert_eq!(texts(&mut shell), vec!["before"]);
    }

    #[test]
    fn test_clear_screen_rewrites_banner() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            start_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        let mut shell =
            Shell::with_launcher(config, Box::new(FakeLauncher::default())).unwrap();

        let banner_lines = shell.transcript().len();
        assert!(banner_lines > 0);

        shell.execute("echo noise");
        shell.clear_screen();
        assert_eq!(shell.transcript().len(), banner_lines);
        assert!(
            shell
                .transcript()
                .lines()
                .all(|line| line.style == LineStyle::Banner)
        );
    }

    #[test]
    fn test_resolve_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        let shell = test_shell(temp_dir.path());

        assert_eq!(shell.resolve_path("sub"), temp_dir.path().join("sub"));
        assert_eq!(shell.resolve_path("sub/../sub/./"), temp_dir.path().join("sub"));
        assert_eq!(shell.resolve_path(".."), normalize_path(&temp_dir.path().join("..")));
    }
}
