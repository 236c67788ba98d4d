//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod buffers;
pub mod download;
pub mod formatter;
pub mod paths;
pub mod python;
pub mod runtime;
pub mod settings;
pub mod storage;
pub mod widget;

pub use buffers::BufferRegistry;
pub use download::{DirectoryDownloads, FilePreview};
pub use formatter::{NoFormatter, PrettierFormatter};
pub use paths::{
    ensure_downloads_dir, ensure_log_dir, ensure_state_dir, get_downloads_dir, get_log_dir,
    get_state_dir,
};
pub use python::PythonProcess;
pub use runtime::{AppMessage, AsyncRuntime, ScriptHost};
pub use settings::{ensure_settings_file, get_settings_path, load_settings};
pub use storage::{FileSlot, MemorySlot, WorkspaceStore};
pub use widget::HeadlessWidget;
