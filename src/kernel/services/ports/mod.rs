//! Service ports: traits + data contracts.

pub mod editor;
pub mod formatter;
pub mod runtime;
pub mod settings;
pub mod storage;
pub mod surface;

pub use editor::{BufferId, CursorPosition, EditorWidget, WidgetEvent};
pub use formatter::{FormatError, Formatter};
pub use runtime::{RuntimeError, ScriptOutput, ScriptRuntime};
pub use settings::{FormatterSettings, PythonSettings, Settings};
pub use storage::{PersistedFile, PersistedWorkspace, StateSlot, StorageError};
pub use surface::{DownloadError, DownloadSink, PreviewSurface};
