//! Lays the transcript and the live prompt line out as screen rows

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use unicode_width::UnicodeWidthChar;

use crate::core::{LineStyle, Shell};

use super::theme::Theme;

/// One screen row produced by hard-wrapping a transcript line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub text: String,
    pub style: LineStyle,
}

/// Screen rows for the console area, oldest first, plus the cursor cell
/// (row index, column) inside the prompt rows
#[derive(Debug)]
pub(crate) struct ConsoleRows {
    pub rows: Vec<Row>,
    pub cursor: (usize, u16),
}

/// Hard-wrap `text` into rows of at most `width` display columns.
///
/// Also returns where each char starts as (row, column), plus one extra entry
/// for the position just past the last char. A wide char that would straddle
/// the edge moves to the next row.
pub(crate) fn wrap_text(text: &str, width: usize) -> (Vec<String>, Vec<(usize, usize)>) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut positions = Vec::new();
    let mut col = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if col > 0 && col + ch_width > width {
            rows.push(String::new());
            col = 0;
        }
        positions.push((rows.len() - 1, col));
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        col += ch_width;
    }

    // The end of a full row is the start of the next one.
    if col >= width {
        positions.push((rows.len(), 0));
    } else {
        positions.push((rows.len() - 1, col));
    }
    (rows, positions)
}

pub(crate) fn layout_rows(shell: &Shell, width: usize) -> ConsoleRows {
    let mut rows = Vec::new();

    for line in shell.transcript().lines() {
        let (wrapped, _) = wrap_text(&line.text, width);
        rows.extend(wrapped.into_iter().map(|text| Row {
            text,
            style: line.style,
        }));
    }

    let prompt_start = rows.len();
    let live = format!("{}{}", shell.prompt(), shell.input().text());
    let (wrapped, positions) = wrap_text(&live, width);
    rows.extend(wrapped.into_iter().map(|text| Row {
        text,
        style: LineStyle::Prompt,
    }));

    let offset = shell.prompt().chars().count() + shell.input().cursor();
    let (row, col) = positions
        .get(offset)
        .or_else(|| positions.last())
        .copied()
        .unwrap_or_default();
    let cursor_row = prompt_start + row;
    if cursor_row >= rows.len() {
        rows.push(Row {
            text: String::new(),
            style: LineStyle::Prompt,
        });
    }

    ConsoleRows {
        rows,
        cursor: (cursor_row, col as u16),
    }
}

/// Index of the first visible row when `height` rows fit and the view is
/// scrolled `scroll` rows up from the bottom
pub(crate) fn first_visible(total: usize, height: usize, scroll: usize) -> usize {
    total.saturating_sub(height).saturating_sub(scroll)
}

pub(crate) fn draw(frame: &mut Frame<'_>, shell: &Shell, theme: &Theme, scroll: &mut usize) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let console = chunks[0];
    let status = chunks[1];

    frame.render_widget(Block::default().style(theme.base_style()), area);

    let laid_out = layout_rows(shell, console.width as usize);
    let height = console.height as usize;
    let max_scroll = laid_out.rows.len().saturating_sub(height);
    *scroll = (*scroll).min(max_scroll);

    let first = first_visible(laid_out.rows.len(), height, *scroll);
    let lines: Vec<Line<'_>> = laid_out
        .rows
        .iter()
        .skip(first)
        .take(height)
        .map(|row| Line::from(Span::styled(row.text.clone(), theme.line_style(row.style))))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(theme.base_style()), console);

    let (cursor_row, cursor_col) = laid_out.cursor;
    if *scroll == 0 && cursor_row >= first && cursor_row < first + height {
        frame.set_cursor(
            console.x + cursor_col,
            console.y + (cursor_row - first) as u16,
        );
    }

    draw_status(frame, shell, theme, status, *scroll);
}

fn draw_status(frame: &mut Frame<'_>, shell: &Shell, theme: &Theme, area: Rect, scroll: usize) {
    let text = if scroll > 0 {
        format!("-- scrolled back {scroll} line(s) --")
    } else {
        shell.status().to_string()
    };
    frame.render_widget(Paragraph::new(text).style(theme.status_style()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::tests::test_shell;
    use tempfile::TempDir;

    fn rows(text: &str, width: usize) -> Vec<String> {
        wrap_text(text, width).0
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(rows("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(rows("", 4), vec![""]);
        assert_eq!(rows("héllo", 2), vec!["hé", "ll", "o"]);
    }

    #[test]
    fn test_wrap_text_counts_display_width() {
        assert_eq!(rows("日本語", 4), vec!["日本", "語"]);
        assert_eq!(rows("a日本", 4), vec!["a日", "本"]);

        let (_, positions) = wrap_text("a日本", 4);
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn test_cursor_after_wide_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());
        shell.input_mut().replace("日本");

        let laid_out = layout_rows(&shell, 5);
        let texts: Vec<&str> = laid_out.rows.iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, vec!["> 日", "本"]);
        assert_eq!(laid_out.cursor, (1, 2));

        let laid_out = layout_rows(&shell, 6);
        assert_eq!(laid_out.rows.len(), 2);
        assert_eq!(laid_out.cursor, (1, 0));

        shell.input_mut().move_left();
        let laid_out = layout_rows(&shell, 6);
        assert_eq!(laid_out.cursor, (0, 4));
    }

    #[test]
    fn test_prompt_row_follows_transcript() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());
        shell.execute("echo 0123456789");
        shell.input_mut().replace("ec");

        let laid_out = layout_rows(&shell, 8);
        let texts: Vec<&str> = laid_out.rows.iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, vec!["01234567", "89", "> ec"]);
        assert_eq!(laid_out.cursor, (2, 4));
    }

    #[test]
    fn test_cursor_wraps_onto_fresh_row() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = test_shell(temp_dir.path());
        shell.input_mut().replace("abcd");

        let laid_out = layout_rows(&shell, 6);
        assert_eq!(laid_out.rows.len(), 2);
        assert_eq!(laid_out.cursor, (1, 0));

        shell.input_mut().move_home();
        let laid_out = layout_rows(&shell, 6);
        assert_eq!(laid_out.rows.len(), 1);
        assert_eq!(laid_out.cursor, (0, 2));
    }

    #[test]
    fn test_first_visible() {
        assert_eq!(first_visible(100, 20, 0), 80);
        assert_eq!(first_visible(100, 20, 30), 50);
        assert_eq!(first_visible(10, 20, 0), 0);
    }
}
