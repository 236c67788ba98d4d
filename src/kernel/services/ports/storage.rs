//! Persisted workspace slot.
//!
//! The slot holds one JSON document:
//! `{ "files": { "<name>": { "content": "...", "lang": "..." } }, "activeName": "<name>" | null }`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kernel::language::LanguageTag;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed workspace state: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWorkspace {
    #[serde(default)]
    pub files: IndexMap<String, PersistedFile>,
    #[serde(default, rename = "activeName", alias = "activeFile")]
    pub active_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedFile {
    #[serde(default)]
    pub content: String,
    #[serde(default = "plaintext")]
    pub lang: LanguageTag,
}

fn plaintext() -> LanguageTag {
    LanguageTag::PlainText
}

impl PersistedWorkspace {
    pub fn from_json(data: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A single durable key-value slot. Writes replace the whole value.
pub trait StateSlot {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, data: &str) -> Result<(), StorageError>;
}
