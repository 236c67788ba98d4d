//! Render models for the file list, tab strip and status bar.

use super::language::extension_of;
use super::state::StatusState;
use super::workspace::Workspace;

pub const EMPTY_FILE_LIST: &str = "No files yet";
pub const NO_FILE_OPEN: &str = "No file open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileListView {
    Empty { placeholder: &'static str },
    Rows(Vec<EntryRow>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabStripView {
    pub tabs: Vec<EntryRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub file: String,
    pub language: String,
    pub position: String,
    pub chars: String,
}

fn rows(workspace: &Workspace) -> Vec<EntryRow> {
    workspace
        .names()
        .map(|name| EntryRow {
            name: name.to_string(),
            active: workspace.is_active(name),
        })
        .collect()
}

impl FileListView {
    pub fn render(workspace: &Workspace) -> Self {
        if workspace.is_empty() {
            Self::Empty {
                placeholder: EMPTY_FILE_LIST,
            }
        } else {
            Self::Rows(rows(workspace))
        }
    }
}

impl TabStripView {
    pub fn render(workspace: &Workspace) -> Self {
        Self {
            tabs: rows(workspace),
        }
    }
}

impl StatusView {
    pub fn render(workspace: &Workspace, status: &StatusState) -> Self {
        match workspace.active_file() {
            Some((name, file)) => Self {
                file: name.to_string(),
                language: extension_of(name).to_ascii_uppercase(),
                position: format!("Ln {}, Col {}", status.line + 1, status.column + 1),
                chars: format!("{} chars", file.content.chars().count()),
            },
            None => Self {
                file: NO_FILE_OPEN.to_string(),
                language: "-".to_string(),
                position: String::new(),
                chars: String::new(),
            },
        }
    }
}
