//! Workbench: owns the store and every collaborator, runs the effects the
//! store emits and feeds widget events back in as actions.

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, BufferRegistry, WorkspaceStore};
use crate::kernel::services::ports::{
    DownloadSink, EditorWidget, Formatter, PreviewSurface, Settings, StateSlot,
};
use crate::kernel::{
    Action, AppState, FileListView, FormatScheduler, StatusState, StatusView, Store, TabStripView,
};
use std::sync::mpsc::Receiver;
use std::time::Instant;

mod bridge;
mod tick;

const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;
const READY_MESSAGE: &str = "Editor ready";

/// External collaborators handed to the workbench at startup.
pub struct Collaborators {
    pub widget: Box<dyn EditorWidget>,
    pub formatter: Box<dyn Formatter>,
    pub slot: Box<dyn StateSlot>,
    pub preview: Box<dyn PreviewSurface>,
    pub downloads: Box<dyn DownloadSink>,
    /// Script runtime and the channel its results come back on.
    pub runtime: Option<(AsyncRuntime, Receiver<AppMessage>)>,
}

pub struct Workbench {
    store: Store,
    buffers: BufferRegistry,
    scheduler: FormatScheduler,
    formatter: Box<dyn Formatter>,
    persistence: WorkspaceStore,
    preview: Box<dyn PreviewSurface>,
    downloads: Box<dyn DownloadSink>,
    runtime: Option<AsyncRuntime>,
    runtime_rx: Option<Receiver<AppMessage>>,
    /// Scripts handed to the runtime whose result has not come back yet.
    pending_runs: usize,
    settings: Settings,
    file_list: FileListView,
    tabs: TabStripView,
    status: StatusView,
}

impl Workbench {
    /// Loads the persisted workspace, creates a buffer for every file and
    /// opens the active one.
    pub fn new(settings: Settings, parts: Collaborators) -> Self {
        let persistence = WorkspaceStore::new(parts.slot);
        let mut workspace = persistence.load();
        if workspace.active_name().is_none() {
            let first = workspace.names().next().map(str::to_string);
            if let Some(first) = first {
                workspace.select(&first);
            }
        }

        let mut buffers = BufferRegistry::new(parts.widget);
        for (name, file) in workspace.iter() {
            buffers.ensure(name, file);
        }

        let file_list = FileListView::render(&workspace);
        let tabs = TabStripView::render(&workspace);
        let status = StatusView::render(&workspace, &StatusState::default());
        let active = workspace.active_name().map(str::to_string);
        tracing::info!(files = workspace.len(), active = ?active, "workspace loaded");

        let (runtime, runtime_rx) = match parts.runtime {
            Some((runtime, rx)) => (Some(runtime), Some(rx)),
            None => (None, None),
        };

        let mut workbench = Self {
            store: Store::new(AppState::new(workspace)),
            buffers,
            scheduler: FormatScheduler::new(settings.format_idle()),
            formatter: parts.formatter,
            persistence,
            preview: parts.preview,
            downloads: parts.downloads,
            runtime,
            runtime_rx,
            pending_runs: 0,
            settings,
            file_list,
            tabs,
            status,
        };

        let now = Instant::now();
        if let Some(name) = active {
            workbench.dispatch_at(Action::SelectFile(name), now);
        }
        workbench.dispatch_at(Action::AppendLog(READY_MESSAGE.to_string()), now);
        workbench
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }

    pub fn file_list(&self) -> &FileListView {
        &self.file_list
    }

    pub fn tabs(&self) -> &TabStripView {
        &self.tabs
    }

    pub fn status(&self) -> &StatusView {
        &self.status
    }

    pub fn pending_runs(&self) -> usize {
        self.pending_runs
    }

    pub fn format_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn format_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Text of the buffer currently shown in the widget.
    pub fn editor_text(&self) -> Option<String> {
        let widget = self.buffers.widget();
        widget.active().and_then(|id| widget.text(id))
    }

    pub fn type_text(&mut self, text: &str) -> bool {
        self.type_text_at(text, Instant::now())
    }

    /// Inserts `text` at the cursor of the shown buffer, as a keystroke would.
    pub fn type_text_at(&mut self, text: &str, now: Instant) -> bool {
        let Some(buffer) = self.buffers.widget().active() else {
            return false;
        };
        self.buffers.widget_mut().type_text(buffer, text);
        self.pump_widget_events(now)
    }

    pub fn move_cursor(&mut self, line: usize, column: usize) -> bool {
        let Some(buffer) = self.buffers.widget().active() else {
            return false;
        };
        self.buffers.widget_mut().set_cursor(
            buffer,
            crate::kernel::services::ports::CursorPosition::new(line, column),
        );
        self.pump_widget_events(Instant::now())
    }
}
