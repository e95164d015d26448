//! Styled scrollback of the console

use std::collections::VecDeque;

/// How a transcript line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Dim,
    Error,
    Banner,
    Prompt,
}

/// One line of console output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

/// Bounded list of output lines
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: VecDeque<Line>,
    limit: usize,
    /// Lines before this index were already handed out by `take_pending`
    flushed: usize,
}

impl Transcript {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit: limit.max(1),
            flushed: 0,
        }
    }

    /// Append text, one line per `\n`-separated segment
    pub fn write(&mut self, text: &str, style: LineStyle) {
        for segment in text.split('\n') {
            self.lines.push_back(Line {
                text: segment.trim_end_matches('\r').to_string(),
                style,
            });
        }

        while self.lines.len() > self.limit {
            self.lines.pop_front();
            self.flushed = self.flushed.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.flushed = 0;
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines written since the previous call
    pub fn take_pending(&mut self) -> Vec<Line> {
        let pending = self.lines.iter().skip(self.flushed).cloned().collect();
        self.flushed = self.lines.len();
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(transcript: &Transcript) -> Vec<&str> {
        transcript.lines().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_write_splits_lines() {
        let mut transcript = Transcript::new(100);
        transcript.write("one\ntwo", LineStyle::Dim);
        transcript.write("", LineStyle::Normal);

        assert_eq!(texts(&transcript), vec!["one", "two", ""]);
        assert_eq!(transcript.lines().next().unwrap().style, LineStyle::Dim);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut transcript = Transcript::new(2);
        transcript.write("a\nb\nc", LineStyle::Normal);
        assert_eq!(texts(&transcript), vec!["b", "c"]);
    }

    #[test]
    fn test_take_pending_returns_only_new_lines() {
        let mut transcript = Transcript::new(3);
        transcript.write("a", LineStyle::Normal);
        assert_eq!(transcript.take_pending().len(), 1);

        transcript.write("b\nc\nd", LineStyle::Normal);
        let pending: Vec<String> = transcript.take_pending().into_iter().map(|l| l.text).collect();
        assert_eq!(pending, vec!["b", "c", "d"]);
        assert!(transcript.take_pending().is_empty());

        transcript.clear();
        transcript.write("e", LineStyle::Normal);
        assert_eq!(transcript.take_pending().len(), 1);
    }
}
