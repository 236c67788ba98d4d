/// Side effects requested by the store, executed in order by the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the whole workspace to the persisted slot.
    PersistWorkspace,
    /// Show the buffer of `name`, creating it on first open.
    OpenBuffer(String),
    /// Overwrite an existing buffer with the workspace content of `name`.
    ReloadBuffer(String),
    /// Nothing is selected any more; clear the display surface.
    ClearEditor,
    DisposeBuffer(String),
    /// File set or selection changed: re-render file list and tabs.
    RenderFileList,
    RenderStatus,
    LoadPreview(String),
    ArmFormat,
    CancelFormat,
    FormatNow,
    RunScript {
        name: String,
        code: String,
    },
    Download {
        file_name: String,
        bytes: Vec<u8>,
    },
}
