//! Persisted workspace slots.
//!
//! `FileSlot` keeps the JSON document in `<state dir>/<key>.json`, written
//! through a temp file and rename so a reader never sees a partial write.

use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{PersistedWorkspace, StateSlot, StorageError};
use crate::kernel::workspace::Workspace;

pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path, key: &str) -> Self {
        Self::new(dir.join(format!("{key}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, data: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    value: Option<String>,
    writes: usize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, data: &str) -> Result<(), StorageError> {
        self.value = Some(data.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Loads and saves the whole workspace through one slot.
pub struct WorkspaceStore {
    slot: Box<dyn StateSlot>,
}

impl WorkspaceStore {
    pub fn new(slot: Box<dyn StateSlot>) -> Self {
        Self { slot }
    }

    /// Reads the slot. Missing, unreadable or empty state yields the seeded
    /// default workspace; corruption is logged, never returned.
    pub fn load(&self) -> Workspace {
        let persisted = match self.slot.read() {
            Ok(Some(data)) => match PersistedWorkspace::from_json(&data) {
                Ok(persisted) => Some(persisted),
                Err(e) => {
                    tracing::warn!(error = %e, "stored workspace is corrupt, starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored workspace");
                None
            }
        };

        match persisted.map(Workspace::from_persisted) {
            Some(workspace) if !workspace.is_empty() => workspace,
            _ => Workspace::seeded(),
        }
    }

    pub fn save(&mut self, workspace: &Workspace) -> Result<(), StorageError> {
        let data = workspace.to_persisted().to_json()?;
        self.slot.write(&data)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/storage.rs"]
mod tests;
