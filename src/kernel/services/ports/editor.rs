//! Contract of the embedded code-editing widget.
//!
//! The widget owns per-file text buffers addressed by an opaque [`BufferId`].
//! It never knows about workspace file names; the buffer registry keeps that
//! mapping.

use crate::kernel::language::LanguageTag;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Zero-based line and grapheme column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    ContentChanged {
        buffer: BufferId,
    },
    CursorMoved {
        buffer: BufferId,
        position: CursorPosition,
    },
}

pub trait EditorWidget {
    /// Creates a buffer at `uri` seeded with `text`.
    fn create_buffer(&mut self, uri: &str, text: &str, language: &LanguageTag) -> BufferId;

    /// Returns false when the buffer does not exist.
    fn dispose_buffer(&mut self, buffer: BufferId) -> bool;

    fn buffer_count(&self) -> usize;

    /// Shows `buffer` in the display surface; `None` clears it.
    fn set_active(&mut self, buffer: Option<BufferId>);

    fn active(&self) -> Option<BufferId>;

    fn set_language(&mut self, buffer: BufferId, language: &LanguageTag);

    fn language(&self, buffer: BufferId) -> Option<LanguageTag>;

    fn text(&self, buffer: BufferId) -> Option<String>;

    /// Replaces the full text. Emits `ContentChanged`.
    fn set_text(&mut self, buffer: BufferId, text: &str);

    /// Inserts at the cursor as if typed. Emits `ContentChanged` then
    /// `CursorMoved`.
    fn type_text(&mut self, buffer: BufferId, text: &str);

    fn cursor(&self, buffer: BufferId) -> Option<CursorPosition>;

    /// Positions past the end of the text are clamped. Emits `CursorMoved`.
    fn set_cursor(&mut self, buffer: BufferId, position: CursorPosition);

    fn poll_event(&mut self) -> Option<WidgetEvent>;
}
