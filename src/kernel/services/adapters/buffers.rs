//! Buffer registry: workspace file name to editor buffer.
//!
//! Buffers are created lazily on first open and live until the file is
//! deleted. Closing a file only detaches it from the display.

use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{BufferId, EditorWidget};
use crate::kernel::workspace::WorkspaceFile;

const URI_PREFIX: &str = "inmemory://model/";

pub fn buffer_uri(name: &str) -> String {
    format!("{URI_PREFIX}{name}")
}

pub struct BufferRegistry {
    widget: Box<dyn EditorWidget>,
    by_name: FxHashMap<String, BufferId>,
    by_id: FxHashMap<BufferId, String>,
}

impl BufferRegistry {
    pub fn new(widget: Box<dyn EditorWidget>) -> Self {
        Self {
            widget,
            by_name: FxHashMap::default(),
            by_id: FxHashMap::default(),
        }
    }

    pub fn widget(&self) -> &dyn EditorWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn EditorWidget {
        self.widget.as_mut()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<BufferId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, buffer: BufferId) -> Option<&str> {
        self.by_id.get(&buffer).map(String::as_str)
    }

    /// Returns the buffer for `name`, creating it from `file` when missing.
    pub fn ensure(&mut self, name: &str, file: &WorkspaceFile) -> BufferId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = self
            .widget
            .create_buffer(&buffer_uri(name), &file.content, &file.language);
        tracing::debug!(name, buffer = id.raw(), "buffer created");
        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());
        id
    }

    /// Shows the buffer for `name` and re-applies the file's language.
    pub fn open(&mut self, name: &str, file: &WorkspaceFile) -> BufferId {
        let id = self.ensure(name, file);
        self.widget.set_active(Some(id));
        self.widget.set_language(id, &file.language);
        id
    }

    /// Replaces an existing buffer's text. Missing buffers are left to be
    /// created on the next open.
    pub fn reload(&mut self, name: &str, text: &str) -> bool {
        let Some(id) = self.id_of(name) else {
            return false;
        };
        if self.widget.text(id).as_deref() != Some(text) {
            self.widget.set_text(id, text);
        }
        true
    }

    pub fn dispose(&mut self, name: &str) -> bool {
        let Some(id) = self.by_name.remove(name) else {
            return false;
        };
        self.by_id.remove(&id);
        tracing::debug!(name, buffer = id.raw(), "buffer disposed");
        self.widget.dispose_buffer(id)
    }

    pub fn clear_active(&mut self) {
        self.widget.set_active(None);
    }

    pub fn active_name(&self) -> Option<&str> {
        self.widget.active().and_then(|id| self.name_of(id))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/buffers.rs"]
mod tests;
