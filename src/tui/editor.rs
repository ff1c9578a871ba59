use crate::util::unicode;

/// An in-place text buffer with a byte-offset cursor, used for every text
/// field in the UI. Multi-line buffers accept newlines and vertical movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    /// Byte offset, always on a grapheme boundary
    pub cursor: usize,
    pub multiline: bool,
}

impl TextInput {
    /// A single-line input holding `text`, cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextInput {
            text,
            cursor,
            multiline: false,
        }
    }

    pub fn multiline(text: impl Into<String>) -> Self {
        TextInput {
            multiline: true,
            ..TextInput::new(text)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Single-line inputs get line breaks as spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean = if self.multiline {
            s.replace('\r', "")
        } else {
            s.replace(['\r', '\n'], " ")
        };
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    /// Delete back to the start of the previous word
    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    /// Start of the current line
    pub fn home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End of the current line
    pub fn end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Move up one line, keeping the display column where possible.
    /// Returns false when already on the first line.
    pub fn up(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let col = unicode::cursor_column(&self.text, self.cursor);
        let prev_start = self.line_start(start - 1);
        let prev_line = &self.text[prev_start..start - 1];
        self.cursor = prev_start + unicode::column_to_offset(prev_line, col);
        true
    }

    /// Move down one line. Returns false when already on the last line.
    pub fn down(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            return false;
        }
        let col = unicode::cursor_column(&self.text, self.cursor);
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        let next_line = &self.text[next_start..next_end];
        self.cursor = next_start + unicode::column_to_offset(next_line, col);
        true
    }

    /// (line, display column) of the cursor
    pub fn cursor_position(&self) -> (usize, usize) {
        let line = self.text[..self.cursor].matches('\n').count();
        (line, unicode::cursor_column(&self.text, self.cursor))
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..]
            .find('\n')
            .map_or(self.text.len(), |i| at + i)
    }
}
