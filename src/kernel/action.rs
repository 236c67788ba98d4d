use super::services::ports::{RuntimeError, ScriptOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewFile(String),
    DeleteFile(String),
    CloseFile(String),
    SelectFile(String),
    ImportFiles(Vec<ImportedFile>),
    /// The buffer owned by `name` now holds `text`.
    BufferContentChanged {
        name: String,
        text: String,
        line: usize,
        column: usize,
    },
    CursorMoved {
        line: usize,
        column: usize,
    },
    Run,
    FormatNow,
    ExportFile,
    ExportArchive,
    ClearLog,
    TogglePreview,
    ToggleLog,
    AppendLog(String),
    ScriptFinished {
        name: String,
        result: Result<ScriptOutput, RuntimeError>,
    },
}
