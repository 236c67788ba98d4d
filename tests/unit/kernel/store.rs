use super::*;
use crate::kernel::services::ports::{RuntimeError, ScriptOutput};
use crate::kernel::workspace::{Workspace, HTML_TEMPLATE};

fn new_store() -> Store {
    Store::new(AppState::new(Workspace::new()))
}

fn store_with(names: &[&str]) -> Store {
    let mut store = new_store();
    for name in names {
        store.dispatch(Action::NewFile(name.to_string()));
    }
    store
}

fn content_changed(name: &str, text: &str) -> Action {
    Action::BufferContentChanged {
        name: name.to_string(),
        text: text.to_string(),
        line: 0,
        column: text.len(),
    }
}

#[test]
fn new_file_persists_opens_and_logs() {
    let mut store = new_store();
    let result = store.dispatch(Action::NewFile("x.html".to_string()));

    assert!(result.state_changed);
    assert_eq!(
        result.effects,
        vec![
            Effect::PersistWorkspace,
            Effect::CancelFormat,
            Effect::OpenBuffer("x.html".to_string()),
            Effect::RenderFileList,
            Effect::RenderStatus,
            Effect::LoadPreview(HTML_TEMPLATE.to_string()),
        ]
    );
    assert_eq!(store.state().workspace.active_name(), Some("x.html"));
    assert_eq!(store.state().log.last_message(), Some("Created x.html"));
}

#[test]
fn new_file_with_existing_name_selects_it() {
    let mut store = store_with(&["a.js", "b.js"]);
    let result = store.dispatch(Action::NewFile("a.js".to_string()));

    assert!(result
        .effects
        .contains(&Effect::OpenBuffer("a.js".to_string())));
    assert_eq!(store.state().workspace.active_name(), Some("a.js"));
    assert_eq!(store.state().workspace.len(), 2);
    assert_eq!(store.state().log.last_message(), Some("Created b.js"));
}

#[test]
fn new_file_with_empty_name_is_ignored() {
    let mut store = new_store();
    let result = store.dispatch(Action::NewFile(String::new()));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn delete_active_disposes_once_and_reopens_remaining() {
    let mut store = store_with(&["a.js", "b.js"]);
    let result = store.dispatch(Action::DeleteFile("b.js".to_string()));

    let disposed: Vec<_> = result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::DisposeBuffer(_)))
        .collect();
    assert_eq!(disposed, vec![&Effect::DisposeBuffer("b.js".to_string())]);
    assert!(result
        .effects
        .contains(&Effect::OpenBuffer("a.js".to_string())));
    assert_eq!(store.state().workspace.active_name(), Some("a.js"));
}

#[test]
fn delete_inactive_only_rerenders_list() {
    let mut store = store_with(&["a.js", "b.js"]);
    let result = store.dispatch(Action::DeleteFile("a.js".to_string()));

    assert_eq!(
        result.effects,
        vec![
            Effect::DisposeBuffer("a.js".to_string()),
            Effect::PersistWorkspace,
            Effect::RenderFileList,
        ]
    );
    assert_eq!(store.state().workspace.active_name(), Some("b.js"));
}

#[test]
fn delete_missing_is_noop() {
    let mut store = store_with(&["a.js"]);
    let result = store.dispatch(Action::DeleteFile("zzz".to_string()));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn delete_last_file_clears_editor() {
    let mut store = store_with(&["a.js"]);
    let result = store.dispatch(Action::DeleteFile("a.js".to_string()));

    assert!(result.effects.contains(&Effect::ClearEditor));
    assert!(store.state().workspace.active_name().is_none());
}

#[test]
fn close_never_disposes() {
    let mut store = store_with(&["a.js", "b.js"]);
    let result = store.dispatch(Action::CloseFile("b.js".to_string()));

    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::DisposeBuffer(_))));
    assert!(result
        .effects
        .contains(&Effect::OpenBuffer("a.js".to_string())));
    assert!(store.state().workspace.contains("b.js"));
}

#[test]
fn close_inactive_keeps_selection() {
    let mut store = store_with(&["a.js", "b.js"]);
    let result = store.dispatch(Action::CloseFile("a.js".to_string()));

    assert_eq!(
        result.effects,
        vec![Effect::PersistWorkspace, Effect::RenderFileList]
    );
    assert_eq!(store.state().workspace.active_name(), Some("b.js"));
}

#[test]
fn select_missing_is_noop() {
    let mut store = store_with(&["a.js"]);
    let result = store.dispatch(Action::SelectFile("nope.js".to_string()));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn content_change_persists_before_arming_format() {
    let mut store = store_with(&["page.html"]);
    let result = store.dispatch(content_changed("page.html", "<p>x</p>"));

    assert_eq!(
        result.effects,
        vec![
            Effect::PersistWorkspace,
            Effect::RenderStatus,
            Effect::LoadPreview("<p>x</p>".to_string()),
            Effect::ArmFormat,
        ]
    );
    assert_eq!(
        store.state().workspace.get("page.html").unwrap().content,
        "<p>x</p>"
    );
    assert_eq!(store.state().ui.status.column, 8);
}

#[test]
fn content_change_for_script_does_not_touch_preview() {
    let mut store = store_with(&["app.js"]);
    let result = store.dispatch(content_changed("app.js", "let a;"));

    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::LoadPreview(_))));
    assert!(store.state().ui.preview.source.is_none());
}

#[test]
fn content_change_for_unknown_file_is_ignored() {
    let mut store = store_with(&["app.js"]);
    let result = store.dispatch(content_changed("ghost.js", "x"));
    assert!(result.effects.is_empty());
    assert!(!store.state().workspace.contains("ghost.js"));
}

#[test]
fn run_html_sets_preview_verbatim() {
    let mut store = store_with(&["page.html"]);
    store.dispatch(content_changed("page.html", "<h1>hi</h1>"));

    let result = store.dispatch(Action::Run);
    assert_eq!(
        result.effects,
        vec![Effect::LoadPreview("<h1>hi</h1>".to_string())]
    );
    assert_eq!(
        store.state().ui.preview.source.as_deref(),
        Some("<h1>hi</h1>")
    );
    assert_eq!(store.state().log.last_message(), Some("Preview updated"));
}

#[test]
fn run_unsupported_logs_and_leaves_preview() {
    let mut store = store_with(&["page.html", "note.txt"]);
    let before = store.state().ui.preview.source.clone();

    let result = store.dispatch(Action::Run);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().ui.preview.source, before);
    assert!(store.state().log.contains("not supported"));
}

#[test]
fn run_python_requests_script_execution() {
    let mut store = store_with(&["main.py"]);
    store.dispatch(content_changed("main.py", "print(2)"));

    let result = store.dispatch(Action::Run);
    assert_eq!(
        result.effects,
        vec![Effect::RunScript {
            name: "main.py".to_string(),
            code: "print(2)".to_string(),
        }]
    );
}

#[test]
fn run_without_active_file_is_noop() {
    let mut store = new_store();
    assert!(store.dispatch(Action::Run).effects.is_empty());
}

#[test]
fn script_results_are_logged_with_file_name() {
    let mut store = new_store();
    store.dispatch(Action::ScriptFinished {
        name: "main.py".to_string(),
        result: Ok(ScriptOutput {
            value: Some("42".to_string()),
        }),
    });
    assert_eq!(store.state().log.last_message(), Some("[main.py] 42"));

    store.dispatch(Action::ScriptFinished {
        name: "main.py".to_string(),
        result: Err(RuntimeError::Execution("NameError: x".to_string())),
    });
    assert_eq!(
        store.state().log.last_message(),
        Some("Error in main.py: NameError: x")
    );
}

#[test]
fn export_archive_with_no_files_only_logs() {
    let mut store = new_store();
    let result = store.dispatch(Action::ExportArchive);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().log.last_message(), Some("No files to export"));
}

#[test]
fn export_archive_downloads_project_zip() {
    let mut store = store_with(&["a.txt", "b.txt"]);
    let result = store.dispatch(Action::ExportArchive);

    let [Effect::Download { file_name, bytes }] = result.effects.as_slice() else {
        panic!("expected a single download");
    };
    assert_eq!(file_name, "project_files.zip");
    assert_eq!(&bytes[..4], &[0x50, 0x4b, 0x03, 0x04]);
}

#[test]
fn export_file_downloads_active_content() {
    let mut store = store_with(&["a.txt"]);
    store.dispatch(content_changed("a.txt", "hello"));

    let result = store.dispatch(Action::ExportFile);
    assert_eq!(
        result.effects,
        vec![Effect::Download {
            file_name: "a.txt".to_string(),
            bytes: b"hello".to_vec(),
        }]
    );

    let mut empty = new_store();
    assert!(empty.dispatch(Action::ExportFile).effects.is_empty());
}

#[test]
fn import_persists_per_entry_and_selects_last() {
    let mut store = store_with(&["a.js"]);
    let result = store.dispatch(Action::ImportFiles(vec![
        ImportedFile {
            name: "a.js".to_string(),
            text: "1".to_string(),
        },
        ImportedFile {
            name: "b.css".to_string(),
            text: "p{}".to_string(),
        },
    ]));

    let persists = result
        .effects
        .iter()
        .filter(|e| **e == Effect::PersistWorkspace)
        .count();
    assert_eq!(persists, 2);
    assert!(result
        .effects
        .contains(&Effect::ReloadBuffer("a.js".to_string())));
    assert_eq!(store.state().workspace.active_name(), Some("b.css"));
    assert_eq!(store.state().workspace.get("a.js").unwrap().content, "1");
}

#[test]
fn toggles_and_clear_log() {
    let mut store = store_with(&["a.js"]);
    assert!(store.state().ui.preview.visible);
    store.dispatch(Action::TogglePreview);
    assert!(!store.state().ui.preview.visible);
    store.dispatch(Action::ToggleLog);
    assert!(!store.state().ui.log_visible);

    assert!(store.dispatch(Action::ClearLog).state_changed);
    assert!(store.state().log.is_empty());
}

#[test]
fn cursor_move_only_rerenders_status() {
    let mut store = store_with(&["a.js"]);
    let result = store.dispatch(Action::CursorMoved { line: 3, column: 1 });
    assert_eq!(result.effects, vec![Effect::RenderStatus]);

    let again = store.dispatch(Action::CursorMoved { line: 3, column: 1 });
    assert!(!again.state_changed);
}
