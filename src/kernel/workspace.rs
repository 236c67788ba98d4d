//! Workspace model: named virtual files plus the single active selection.
//!
//! Invariants:
//! - names are never empty
//! - `active` is `None` whenever there are no files, and otherwise names an
//!   existing entry or nothing (every tab closed)
//!
//! Iteration order is insertion order; overwriting an entry keeps its slot.

use indexmap::IndexMap;

use super::language::{extension_of, LanguageTag};
use super::services::ports::{PersistedFile, PersistedWorkspace};

pub const HTML_TEMPLATE: &str =
    "<!doctype html>\n<html>\n<head>\n<meta charset='utf-8'>\n</head>\n<body>\n</body>\n</html>";

pub const DEFAULT_FILE_NAME: &str = "index.html";
pub const DEFAULT_FILE_CONTENT: &str = "<!doctype html><html><body><h1>Hello</h1></body></html>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFile {
    pub content: String,
    pub language: LanguageTag,
}

impl WorkspaceFile {
    /// Seed for a freshly created file: html files get a document skeleton.
    pub fn for_new(name: &str) -> Self {
        let content = if extension_of(name) == "html" {
            HTML_TEMPLATE.to_string()
        } else {
            String::new()
        };
        Self {
            content,
            language: LanguageTag::from_name(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// The name is taken; the caller should select it instead.
    AlreadyExists,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub was_active: bool,
    pub active: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    files: IndexMap<String, WorkspaceFile>,
    active: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The workspace used when nothing usable was persisted.
    pub fn seeded() -> Self {
        let mut workspace = Self::new();
        workspace.files.insert(
            DEFAULT_FILE_NAME.to_string(),
            WorkspaceFile {
                content: DEFAULT_FILE_CONTENT.to_string(),
                language: LanguageTag::Html,
            },
        );
        workspace.active = Some(DEFAULT_FILE_NAME.to_string());
        workspace
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&WorkspaceFile> {
        self.files.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkspaceFile)> {
        self.files.iter().map(|(name, file)| (name.as_str(), file))
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_file(&self) -> Option<(&str, &WorkspaceFile)> {
        let name = self.active.as_deref()?;
        self.files.get(name).map(|file| (name, file))
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    pub fn create(&mut self, name: &str) -> CreateOutcome {
        if name.is_empty() {
            return CreateOutcome::Rejected;
        }
        if self.files.contains_key(name) {
            return CreateOutcome::AlreadyExists;
        }

        self.files.insert(name.to_string(), WorkspaceFile::for_new(name));
        self.active = Some(name.to_string());
        CreateOutcome::Created
    }

    /// Removes `name`. When it was active the selection moves to the first
    /// remaining file, or to nothing.
    pub fn delete(&mut self, name: &str) -> Option<Removal> {
        self.files.shift_remove(name)?;

        let was_active = self.is_active(name);
        if was_active {
            self.active = self.files.keys().next().cloned();
        }
        Some(Removal {
            was_active,
            active: self.active.clone(),
        })
    }

    /// Drops the selection from `name` without touching the file set.
    /// Returns true when the selection moved.
    pub fn close(&mut self, name: &str) -> bool {
        if !self.is_active(name) {
            return false;
        }
        self.active = self.files.keys().find(|n| n.as_str() != name).cloned();
        true
    }

    /// Returns false when `name` does not exist.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.files.contains_key(name) {
            return false;
        }
        self.active = Some(name.to_string());
        true
    }

    /// Returns false when `name` does not exist. Never moves the selection.
    pub fn write_content(&mut self, name: &str, text: &str) -> bool {
        match self.files.get_mut(name) {
            Some(file) => {
                if file.content != text {
                    file.content.clear();
                    file.content.push_str(text);
                }
                true
            }
            None => false,
        }
    }

    /// Stores an externally supplied file, overwriting any entry of the same
    /// name, and selects it.
    pub fn import(&mut self, name: &str, text: String) -> bool {
        if name.is_empty() {
            return false;
        }
        self.files.insert(
            name.to_string(),
            WorkspaceFile {
                content: text,
                language: LanguageTag::from_name(name),
            },
        );
        self.active = Some(name.to_string());
        true
    }

    pub fn is_consistent(&self) -> bool {
        let names_ok = self.files.keys().all(|name| !name.is_empty());
        let active_ok = self
            .active
            .as_deref()
            .map_or(true, |name| self.files.contains_key(name));
        names_ok && active_ok
    }

    pub fn to_persisted(&self) -> PersistedWorkspace {
        PersistedWorkspace {
            files: self
                .files
                .iter()
                .map(|(name, file)| {
                    (
                        name.clone(),
                        PersistedFile {
                            content: file.content.clone(),
                            lang: file.language.clone(),
                        },
                    )
                })
                .collect(),
            active_name: self.active.clone(),
        }
    }

    /// Rebuilds a workspace from stored state, repairing what would break the
    /// invariants: empty names are dropped and a selection naming a missing
    /// file falls back to the first file. No selection stays no selection.
    pub fn from_persisted(persisted: PersistedWorkspace) -> Self {
        let files: IndexMap<String, WorkspaceFile> = persisted
            .files
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, file)| {
                (
                    name,
                    WorkspaceFile {
                        content: file.content,
                        language: file.lang,
                    },
                )
            })
            .collect();

        let active = persisted.active_name.and_then(|name| {
            if files.contains_key(&name) {
                Some(name)
            } else {
                files.keys().next().cloned()
            }
        });
        Self { files, active }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
