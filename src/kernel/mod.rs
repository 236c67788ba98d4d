//! Headless application core (state/action/effect).

pub mod action;
pub mod archive;
pub mod effect;
pub mod format;
pub mod language;
pub mod log;
pub mod run;
pub mod services;
pub mod state;
pub mod store;
pub mod views;
pub mod workspace;

pub use action::{Action, ImportedFile};
pub use archive::{build_archive, ArchiveError, ArchiveWriter, ARCHIVE_FILE_NAME};
pub use effect::Effect;
pub use format::FormatScheduler;
pub use language::{FormatDialect, LanguageTag, RunKind};
pub use log::{LogLine, LogSurface};
pub use run::RunPlan;
pub use state::{AppState, PreviewState, StatusState, UiState};
pub use store::{DispatchResult, Store};
pub use views::{EntryRow, FileListView, StatusView, TabStripView};
pub use workspace::{CreateOutcome, Workspace, WorkspaceFile};
