//! The editable line after the prompt
//!
//! The cursor is a character index into the input; index 0 is the prompt
//! boundary and nothing before it can be edited.

/// Input text and cursor of the current prompt line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptLine {
    buffer: String,
    cursor: usize,
}

impl PromptLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.buffer.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert(offset, ch);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor. Line breaks become spaces so the
    /// input stays a single line.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|ch| *ch != '\r') {
            self.insert(if ch == '\n' { ' ' } else { ch });
        }
    }

    /// Delete the character before the cursor. Returns false at the prompt
    /// boundary.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.buffer.remove(offset);
        true
    }

    /// Delete the character under the cursor; nothing happens at the end
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let offset = self.byte_offset(self.cursor);
            self.buffer.remove(offset);
        }
    }

    /// Returns false when already at the prompt boundary
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole input, cursor at the end
    pub fn replace(&mut self, text: &str) {
        self.buffer.clear();
        self.cursor = 0;
        self.insert_str(text);
    }

    /// Take the input, leaving the line empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }
}
