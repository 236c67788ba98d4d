//! In-process editing widget backed by rope buffers.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::kernel::language::LanguageTag;
use crate::kernel::services::ports::{BufferId, CursorPosition, EditorWidget, WidgetEvent};
use crate::models::TextBuffer;

struct Model {
    uri: String,
    language: LanguageTag,
    buffer: TextBuffer,
}

#[derive(Default)]
pub struct HeadlessWidget {
    models: FxHashMap<BufferId, Model>,
    next_id: u64,
    active: Option<BufferId>,
    events: VecDeque<WidgetEvent>,
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri(&self, buffer: BufferId) -> Option<&str> {
        self.models.get(&buffer).map(|m| m.uri.as_str())
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn cursor_event(&mut self, buffer: BufferId) {
        if let Some(position) = self.cursor(buffer) {
            self.events
                .push_back(WidgetEvent::CursorMoved { buffer, position });
        }
    }
}

impl EditorWidget for HeadlessWidget {
    fn create_buffer(&mut self, uri: &str, text: &str, language: &LanguageTag) -> BufferId {
        self.next_id += 1;
        let id = BufferId::new(self.next_id);
        self.models.insert(
            id,
            Model {
                uri: uri.to_string(),
                language: language.clone(),
                buffer: TextBuffer::from_text(text),
            },
        );
        id
    }

    fn dispose_buffer(&mut self, buffer: BufferId) -> bool {
        if self.models.remove(&buffer).is_none() {
            return false;
        }
        if self.active == Some(buffer) {
            self.active = None;
        }
        self.events.retain(|event| match event {
            WidgetEvent::ContentChanged { buffer: b }
            | WidgetEvent::CursorMoved { buffer: b, .. } => *b != buffer,
        });
        true
    }

    fn buffer_count(&self) -> usize {
        self.models.len()
    }

    fn set_active(&mut self, buffer: Option<BufferId>) {
        self.active = buffer.filter(|id| self.models.contains_key(id));
    }

    fn active(&self) -> Option<BufferId> {
        self.active
    }

    fn set_language(&mut self, buffer: BufferId, language: &LanguageTag) {
        if let Some(model) = self.models.get_mut(&buffer) {
            model.language = language.clone();
        }
    }

    fn language(&self, buffer: BufferId) -> Option<LanguageTag> {
        self.models.get(&buffer).map(|m| m.language.clone())
    }

    fn text(&self, buffer: BufferId) -> Option<String> {
        self.models.get(&buffer).map(|m| m.buffer.text())
    }

    fn set_text(&mut self, buffer: BufferId, text: &str) {
        let Some(model) = self.models.get_mut(&buffer) else {
            return;
        };
        model.buffer.set_text(text);
        self.events.push_back(WidgetEvent::ContentChanged { buffer });
    }

    fn type_text(&mut self, buffer: BufferId, text: &str) {
        let Some(model) = self.models.get_mut(&buffer) else {
            return;
        };
        model.buffer.insert_str(text);
        self.events.push_back(WidgetEvent::ContentChanged { buffer });
        self.cursor_event(buffer);
    }

    fn cursor(&self, buffer: BufferId) -> Option<CursorPosition> {
        self.models.get(&buffer).map(|m| {
            let (line, column) = m.buffer.cursor();
            CursorPosition::new(line, column)
        })
    }

    fn set_cursor(&mut self, buffer: BufferId, position: CursorPosition) {
        let Some(model) = self.models.get_mut(&buffer) else {
            return;
        };
        model.buffer.set_cursor(position.line, position.column);
        self.cursor_event(buffer);
    }

    fn poll_event(&mut self) -> Option<WidgetEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/widget.rs"]
mod tests;
