//! Single-line text editing for the phone input.
//!
//! `LineEditor` owns the buffer and a byte-offset cursor that always sits
//! on a char boundary. Mutating methods return `true` when something changed.

use unicode_width::UnicodeWidthStr;

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[derive(Debug, Default)]
pub(super) struct LineEditor {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pos: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pos = 0;
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' || c == '\r' {
            return false;
        }
        self.buffer.insert(self.pos, c);
        self.pos += c.len_utf8();
        true
    }

    /// Inserts pasted text on a single line (line breaks are dropped).
    pub fn insert_str(&mut self, text: &str) -> bool {
        let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if flat.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.pos, &flat);
        self.pos += flat.len();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.buffer, self.pos);
        self.buffer.drain(prev..self.pos);
        self.pos = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.pos >= self.buffer.len() {
            return false;
        }
        let next = next_char_boundary(&self.buffer, self.pos);
        self.buffer.drain(self.pos..next);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(&self.buffer, self.pos);
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.pos >= self.buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(&self.buffer, self.pos);
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.pos != 0;
        self.pos = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.pos != self.buffer.len();
        self.pos = self.buffer.len();
        moved
    }

    /// Display column of the cursor (terminal cells, not bytes).
    pub fn cursor_column(&self) -> u16 {
        self.buffer[..self.pos].width() as u16
    }
}
