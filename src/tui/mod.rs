//! Full-screen console frontend
//!
//! Owns the terminal (raw mode, alternate screen, bracketed paste), maps key
//! events onto `Shell` operations and redraws after every event or timer.

mod theme;
mod view;

pub use theme::Theme;

use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::{config::Config, core::Shell};

const IDLE_POLL: Duration = Duration::from_millis(250);
const SCROLL_PAGE: usize = 10;

/// Runs the interactive console until the quit sequence completes.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let theme = Theme::from_env(&config.theme).context("Failed to load console colors")?;
    let shell = Shell::new(config.clone()).context("Failed to start the shell")?;

    let mut terminal = TerminalSession::new(&config.title).context("Failed to set up terminal")?;
    let mut app = App::new(shell, theme);
    info!("Console started in {}", app.shell.cwd().display());

    while !app.shell.should_quit() {
        terminal.draw(|frame| app.draw(frame))?;
        if app.bell {
            app.bell = false;
            terminal.ring_bell()?;
        }

        let timeout = app
            .shell
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        app.shell.tick(Instant::now());
    }

    info!("Console closed");
    Ok(())
}

struct App {
    shell: Shell,
    theme: Theme,
    /// Rows scrolled back from the bottom
    scroll: usize,
    bell: bool,
}

impl App {
    fn new(shell: Shell, theme: Theme) -> Self {
        Self {
            shell,
            theme,
            scroll: 0,
            bell: false,
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        view::draw(frame, &self.shell, &self.theme, &mut self.scroll);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // AltGr arrives as CONTROL | ALT on Windows and still types a character.
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        // Scrolling keeps the view where it is; anything else returns to the prompt.
        match key.code {
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_add(SCROLL_PAGE);
                return;
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_sub(SCROLL_PAGE);
                return;
            }
            _ => self.scroll = 0,
        }

        let accepted = match key.code {
            KeyCode::Char('l') if ctrl => {
                self.shell.clear_screen();
                true
            }
            KeyCode::Char('c') if ctrl => {
                debug!("Ctrl+C pressed");
                self.shell.request_exit();
                true
            }
            KeyCode::Char(_) if ctrl => true,
            KeyCode::Char(ch) => {
                self.shell.input_mut().insert(ch);
                true
            }
            KeyCode::Enter => {
                self.shell.submit();
                true
            }
            KeyCode::Backspace => self.shell.input_mut().backspace(),
            KeyCode::Delete => {
                self.shell.input_mut().delete();
                true
            }
            KeyCode::Left => self.shell.input_mut().move_left(),
            KeyCode::Right => {
                self.shell.input_mut().move_right();
                true
            }
            KeyCode::Home => {
                self.shell.input_mut().move_home();
                true
            }
            KeyCode::End => {
                self.shell.input_mut().move_end();
                true
            }
            KeyCode::Up => self.shell.recall_previous(),
            KeyCode::Down => self.shell.recall_next(),
            KeyCode::Tab => self.shell.complete(),
            _ => true,
        };

        if !accepted {
            self.bell = true;
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.scroll = 0;
        self.shell.input_mut().insert_str(text);
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new(title: &str) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableBracketedPaste,
            SetTitle(title)
        )
        .inspect_err(|_| teardown_terminal())?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).inspect_err(|_| teardown_terminal())?;
        terminal.clear().inspect_err(|_| teardown_terminal())?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    fn ring_bell(&mut self) -> io::Result<()> {
        let backend = self.terminal.backend_mut();
        backend.write_all(b"\x07")?;
        backend.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen);
}
