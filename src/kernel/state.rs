use super::log::LogSurface;
use super::workspace::Workspace;

/// Cursor of the active buffer, zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusState {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub visible: bool,
    /// Last document loaded into the preview surface.
    pub source: Option<String>,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            visible: true,
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub preview: PreviewState,
    pub log_visible: bool,
    pub status: StatusState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            preview: PreviewState::default(),
            log_visible: true,
            status: StatusState::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub workspace: Workspace,
    pub ui: UiState,
    pub log: LogSurface,
}

impl AppState {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            ui: UiState::default(),
            log: LogSurface::new(),
        }
    }
}
