//! Reducer half of the sync controller: applies actions to the workspace and
//! emits the effects that keep storage, buffers and views in step.

use super::archive::{build_archive, ARCHIVE_FILE_NAME};
use super::language::RunKind;
use super::run::{self, RunPlan};
use super::workspace::CreateOutcome;
use super::{Action, AppState, Effect, ImportedFile};

#[derive(Debug)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::NewFile(name) => self.new_file(&name),
            Action::DeleteFile(name) => self.delete_file(&name),
            Action::CloseFile(name) => self.close_file(&name),
            Action::SelectFile(name) => self.select_file(&name),
            Action::ImportFiles(files) => self.import_files(files),
            Action::BufferContentChanged {
                name,
                text,
                line,
                column,
            } => self.content_changed(&name, &text, line, column),
            Action::CursorMoved { line, column } => {
                let status = &mut self.state.ui.status;
                if status.line == line && status.column == column {
                    return DispatchResult::unchanged();
                }
                status.line = line;
                status.column = column;
                DispatchResult::changed(vec![Effect::RenderStatus])
            }
            Action::Run => self.run_active(),
            Action::FormatNow => {
                if self.state.workspace.active_name().is_none() {
                    return DispatchResult::unchanged();
                }
                DispatchResult {
                    effects: vec![Effect::FormatNow],
                    state_changed: false,
                }
            }
            Action::ExportFile => {
                let Some((name, file)) = self.state.workspace.active_file() else {
                    return DispatchResult::unchanged();
                };
                let effect = Effect::Download {
                    file_name: name.to_string(),
                    bytes: file.content.as_bytes().to_vec(),
                };
                let message = format!("Exported {name}");
                self.state.log.push(message);
                DispatchResult::changed(vec![effect])
            }
            Action::ExportArchive => self.export_archive(),
            Action::ClearLog => DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.log.clear(),
            },
            Action::TogglePreview => {
                self.state.ui.preview.visible = !self.state.ui.preview.visible;
                DispatchResult::changed(Vec::new())
            }
            Action::ToggleLog => {
                self.state.ui.log_visible = !self.state.ui.log_visible;
                DispatchResult::changed(Vec::new())
            }
            Action::AppendLog(message) => {
                self.state.log.push(message);
                DispatchResult::changed(Vec::new())
            }
            Action::ScriptFinished { name, result } => {
                match result {
                    Ok(output) => match output.value {
                        Some(value) => self.state.log.push(format!("[{name}] {value}")),
                        None => self.state.log.push(format!("{name} finished")),
                    },
                    Err(e) => self.state.log.push(format!("Error in {name}: {e}")),
                }
                DispatchResult::changed(Vec::new())
            }
        }
    }

    fn new_file(&mut self, name: &str) -> DispatchResult {
        match self.state.workspace.create(name) {
            CreateOutcome::Rejected => DispatchResult::unchanged(),
            CreateOutcome::AlreadyExists => self.select_file(name),
            CreateOutcome::Created => {
                tracing::debug!(name, "file created");
                let mut effects = vec![Effect::PersistWorkspace];
                self.push_selection_effects(&mut effects);
                self.state.log.push(format!("Created {name}"));
                DispatchResult::changed(effects)
            }
        }
    }

    fn delete_file(&mut self, name: &str) -> DispatchResult {
        let Some(removal) = self.state.workspace.delete(name) else {
            return DispatchResult::unchanged();
        };

        let mut effects = vec![
            Effect::DisposeBuffer(name.to_string()),
            Effect::PersistWorkspace,
        ];
        if removal.was_active {
            self.push_selection_effects(&mut effects);
        } else {
            effects.push(Effect::RenderFileList);
        }
        self.state.log.push(format!("Deleted {name}"));
        DispatchResult::changed(effects)
    }

    fn close_file(&mut self, name: &str) -> DispatchResult {
        if !self.state.workspace.contains(name) {
            return DispatchResult::unchanged();
        }

        let mut effects = vec![Effect::PersistWorkspace];
        if self.state.workspace.close(name) {
            self.push_selection_effects(&mut effects);
        } else {
            effects.push(Effect::RenderFileList);
        }
        DispatchResult::changed(effects)
    }

    fn select_file(&mut self, name: &str) -> DispatchResult {
        if !self.state.workspace.select(name) {
            return DispatchResult::unchanged();
        }

        let mut effects = vec![Effect::PersistWorkspace];
        self.push_selection_effects(&mut effects);
        DispatchResult::changed(effects)
    }

    fn import_files(&mut self, files: Vec<ImportedFile>) -> DispatchResult {
        let mut effects = Vec::new();
        for ImportedFile { name, text } in files {
            if !self.state.workspace.import(&name, text) {
                continue;
            }
            effects.push(Effect::PersistWorkspace);
            effects.push(Effect::ReloadBuffer(name.clone()));
            self.push_selection_effects(&mut effects);
            self.state.log.push(format!("Imported {name}"));
        }
        DispatchResult {
            state_changed: !effects.is_empty(),
            effects,
        }
    }

    fn content_changed(
        &mut self,
        name: &str,
        text: &str,
        line: usize,
        column: usize,
    ) -> DispatchResult {
        if !self.state.workspace.write_content(name, text) {
            tracing::debug!(name, "content change for unknown file");
            return DispatchResult::unchanged();
        }

        let mut effects = vec![Effect::PersistWorkspace];
        if self.state.workspace.is_active(name) {
            self.state.ui.status.line = line;
            self.state.ui.status.column = column;
            effects.push(Effect::RenderStatus);
            if RunKind::from_name(name) == RunKind::Html {
                self.state.ui.preview.source = Some(text.to_string());
                effects.push(Effect::LoadPreview(text.to_string()));
            }
            effects.push(Effect::ArmFormat);
        }
        DispatchResult::changed(effects)
    }

    fn run_active(&mut self) -> DispatchResult {
        let Some((name, file)) = self.state.workspace.active_file() else {
            return DispatchResult::unchanged();
        };

        match run::plan(name, &file.content) {
            RunPlan::Preview { source, script } => {
                let message = if script {
                    format!("Running {name} in preview")
                } else {
                    "Preview updated".to_string()
                };
                self.state.ui.preview.source = Some(source.clone());
                self.state.log.push(message);
                DispatchResult::changed(vec![Effect::LoadPreview(source)])
            }
            RunPlan::Runtime { name, code } => {
                self.state.log.push(format!("Running {name}..."));
                DispatchResult::changed(vec![Effect::RunScript { name, code }])
            }
            RunPlan::Unsupported { extension } => {
                self.state
                    .log
                    .push(format!("Run is not supported for .{extension} files"));
                DispatchResult::changed(Vec::new())
            }
        }
    }

    fn export_archive(&mut self) -> DispatchResult {
        let workspace = &self.state.workspace;
        if workspace.is_empty() {
            self.state.log.push("No files to export");
            return DispatchResult::changed(Vec::new());
        }

        let count = workspace.len();
        let entries = workspace
            .iter()
            .map(|(name, file)| (name, file.content.as_str()));
        match build_archive(entries) {
            Ok(bytes) => {
                self.state
                    .log
                    .push(format!("Exported {ARCHIVE_FILE_NAME} ({count} files)"));
                DispatchResult::changed(vec![Effect::Download {
                    file_name: ARCHIVE_FILE_NAME.to_string(),
                    bytes,
                }])
            }
            Err(e) => {
                tracing::warn!(error = %e, "archive export failed");
                self.state.log.push(format!("Archive export failed: {e}"));
                DispatchResult::changed(Vec::new())
            }
        }
    }

    /// Effects following any change of the active file: pending format is
    /// dropped, the new buffer is shown (or the editor cleared), views are
    /// re-rendered and an html file refreshes the live preview.
    fn push_selection_effects(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::CancelFormat);
        let active = self
            .state
            .workspace
            .active_file()
            .map(|(name, file)| (name.to_string(), file.content.clone()));

        match active {
            Some((name, content)) => {
                effects.push(Effect::OpenBuffer(name.clone()));
                effects.push(Effect::RenderFileList);
                effects.push(Effect::RenderStatus);
                if RunKind::from_name(&name) == RunKind::Html {
                    self.state.ui.preview.source = Some(content.clone());
                    effects.push(Effect::LoadPreview(content));
                }
            }
            None => {
                self.state.ui.status = Default::default();
                effects.push(Effect::ClearEditor);
                effects.push(Effect::RenderFileList);
                effects.push(Effect::RenderStatus);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
