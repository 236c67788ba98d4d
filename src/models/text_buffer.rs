//! Text buffer model
//!
//! Responsibilities:
//! - text storage (Rope)
//! - cursor tracking in (row, grapheme column)
//! - row/column <-> char offset mapping

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Borrow a `RopeSlice` as `str` when it is contiguous, copy otherwise.
fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replaces the whole text. The cursor keeps its row/column and is
    /// clamped into the new text.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.clamp_pos(self.cursor);
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = self.clamp_pos((row, col));
    }

    fn clamp_pos(&self, pos: (usize, usize)) -> (usize, usize) {
        let last_row = self.last_row();
        let row = pos.0.min(last_row);
        let col = pos.1.min(self.line_grapheme_len(row));
        (row, col)
    }

    fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        let (row, col) = self.clamp_pos(pos);
        self.rope.line_to_char(row) + self.grapheme_to_char_index(row, col)
    }

    fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    fn line_grapheme_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        let without_newline = line
            .strip_suffix("\r\n")
            .or_else(|| line.strip_suffix('\n'))
            .unwrap_or(&line);
        without_newline.graphemes(true).count()
    }

    /// Inserts `s` at the cursor and moves the cursor past it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let (row, col) = self.cursor;
        let char_offset = self.pos_to_char(self.cursor);
        self.rope.insert(char_offset, s);

        self.cursor = match s.rfind('\n') {
            Some(last_newline) => {
                let newlines = s.matches('\n').count();
                let tail = &s[last_newline + 1..];
                (row + newlines, tail.graphemes(true).count())
            }
            None => (row, col + s.graphemes(true).count()),
        };
    }

    fn last_row(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
