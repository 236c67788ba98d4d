use super::Workbench;
use crate::kernel::services::ports::WidgetEvent;
use crate::kernel::{Action, Effect, FileListView, StatusView, TabStripView};
use std::time::Instant;

impl Workbench {
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.dispatch_at(action, Instant::now())
    }

    /// Applies `action`, then drains whatever the widget reported while the
    /// effects ran.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> bool {
        let mut changed = self.apply(action, now);
        changed |= self.pump_widget_events(now);
        changed
    }

    pub(super) fn apply(&mut self, action: Action, now: Instant) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect, now);
        }
        result.state_changed
    }

    pub fn pump_widget_events(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(event) = self.buffers.widget_mut().poll_event() {
            if let Some(action) = self.widget_action(event) {
                changed |= self.apply(action, now);
            }
        }
        changed
    }

    fn widget_action(&self, event: WidgetEvent) -> Option<Action> {
        let widget = self.buffers.widget();
        match event {
            WidgetEvent::ContentChanged { buffer } => {
                let name = self.buffers.name_of(buffer)?;
                let text = widget.text(buffer)?;
                // Echo of a write that came from the workspace itself.
                if self
                    .store
                    .state()
                    .workspace
                    .get(name)
                    .is_some_and(|file| file.content == text)
                {
                    return None;
                }
                let cursor = widget.cursor(buffer).unwrap_or_default();
                Some(Action::BufferContentChanged {
                    name: name.to_string(),
                    text,
                    line: cursor.line,
                    column: cursor.column,
                })
            }
            WidgetEvent::CursorMoved { buffer, position } => {
                if widget.active() != Some(buffer) {
                    return None;
                }
                Some(Action::CursorMoved {
                    line: position.line,
                    column: position.column,
                })
            }
        }
    }

    fn run_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::PersistWorkspace => {
                if let Err(e) = self.persistence.save(&self.store.state().workspace) {
                    tracing::error!(error = %e, "persist workspace failed");
                }
            }
            Effect::OpenBuffer(name) => {
                let Some(file) = self.store.state().workspace.get(&name) else {
                    tracing::warn!(name = %name, "open requested for unknown file");
                    return;
                };
                let buffer = self.buffers.open(&name, file);
                let cursor = self.buffers.widget().cursor(buffer).unwrap_or_default();
                self.apply(
                    Action::CursorMoved {
                        line: cursor.line,
                        column: cursor.column,
                    },
                    now,
                );
            }
            Effect::ReloadBuffer(name) => {
                if let Some(file) = self.store.state().workspace.get(&name) {
                    self.buffers.reload(&name, &file.content);
                }
            }
            Effect::ClearEditor => self.buffers.clear_active(),
            Effect::DisposeBuffer(name) => {
                self.buffers.dispose(&name);
            }
            Effect::RenderFileList => {
                let workspace = &self.store.state().workspace;
                self.file_list = FileListView::render(workspace);
                self.tabs = TabStripView::render(workspace);
            }
            Effect::RenderStatus => {
                let state = self.store.state();
                self.status = StatusView::render(&state.workspace, &state.ui.status);
            }
            Effect::LoadPreview(source) => self.preview.load_source(&source),
            Effect::ArmFormat => {
                if self.settings.auto_format {
                    self.scheduler.arm(now);
                }
            }
            Effect::CancelFormat => {
                self.scheduler.cancel();
            }
            Effect::FormatNow => {
                self.scheduler.cancel();
                self.run_format(now, true);
            }
            Effect::RunScript { name, code } => match &self.runtime {
                Some(runtime) => {
                    runtime.run_script(name, code);
                    self.pending_runs += 1;
                }
                None => {
                    tracing::warn!(name = %name, "no script runtime configured");
                    self.apply(
                        Action::AppendLog("Python runtime is not available".to_string()),
                        now,
                    );
                }
            },
            Effect::Download { file_name, bytes } => {
                if let Err(e) = self.downloads.deliver(&file_name, &bytes) {
                    tracing::warn!(file_name = %file_name, error = %e, "download failed");
                    self.apply(
                        Action::AppendLog(format!("Download of {file_name} failed: {e}")),
                        now,
                    );
                }
            }
        }
    }
}
