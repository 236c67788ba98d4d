use super::*;
use proptest::prelude::*;

fn workspace_with(names: &[&str]) -> Workspace {
    let mut workspace = Workspace::new();
    for name in names {
        assert_eq!(workspace.create(name), CreateOutcome::Created);
    }
    workspace
}

#[test]
fn create_html_seeds_skeleton_and_activates() {
    let mut workspace = Workspace::new();
    assert_eq!(workspace.create("x.html"), CreateOutcome::Created);

    let file = workspace.get("x.html").unwrap();
    assert!(file.content.contains("<html>"));
    assert!(file.content.contains("<body>"));
    assert_eq!(file.language, LanguageTag::Html);
    assert_eq!(workspace.active_name(), Some("x.html"));
}

#[test]
fn create_python_is_empty_and_activates() {
    let mut workspace = workspace_with(&["a.js"]);
    assert_eq!(workspace.create("x.py"), CreateOutcome::Created);

    let file = workspace.get("x.py").unwrap();
    assert_eq!(file.content, "");
    assert_eq!(file.language, LanguageTag::Python);
    assert_eq!(workspace.active_name(), Some("x.py"));
}

#[test]
fn create_duplicate_keeps_existing_content() {
    let mut workspace = workspace_with(&["a.js", "b.js"]);
    workspace.write_content("a.js", "let a = 1;");

    assert_eq!(workspace.create("a.js"), CreateOutcome::AlreadyExists);
    assert_eq!(workspace.get("a.js").unwrap().content, "let a = 1;");
    assert_eq!(workspace.len(), 2);
}

#[test]
fn create_empty_name_is_rejected() {
    let mut workspace = Workspace::new();
    assert_eq!(workspace.create(""), CreateOutcome::Rejected);
    assert!(workspace.is_empty());
    assert!(workspace.active_name().is_none());
}

#[test]
fn delete_active_moves_selection_to_first_remaining() {
    let mut workspace = workspace_with(&["a.js", "b.js", "c.js"]);
    assert_eq!(workspace.active_name(), Some("c.js"));

    let removal = workspace.delete("c.js").unwrap();
    assert!(removal.was_active);
    assert_eq!(removal.active.as_deref(), Some("a.js"));
    assert_eq!(workspace.active_name(), Some("a.js"));
}

#[test]
fn delete_inactive_keeps_selection() {
    let mut workspace = workspace_with(&["a.js", "b.js", "c.js"]);

    let removal = workspace.delete("a.js").unwrap();
    assert!(!removal.was_active);
    assert_eq!(workspace.active_name(), Some("c.js"));
    assert_eq!(workspace.names().collect::<Vec<_>>(), vec!["b.js", "c.js"]);
}

#[test]
fn delete_last_file_clears_selection() {
    let mut workspace = workspace_with(&["a.js"]);
    let removal = workspace.delete("a.js").unwrap();
    assert!(removal.active.is_none());
    assert!(workspace.active_name().is_none());
    assert!(workspace.delete("a.js").is_none());
}

#[test]
fn close_active_keeps_file_and_moves_selection() {
    let mut workspace = workspace_with(&["a.js", "b.js"]);

    assert!(workspace.close("b.js"));
    assert!(workspace.contains("b.js"));
    assert_eq!(workspace.active_name(), Some("a.js"));
}

#[test]
fn close_inactive_is_noop_on_selection() {
    let mut workspace = workspace_with(&["a.js", "b.js"]);

    assert!(!workspace.close("a.js"));
    assert_eq!(workspace.active_name(), Some("b.js"));
}

#[test]
fn close_only_file_leaves_no_selection() {
    let mut workspace = workspace_with(&["a.js"]);
    assert!(workspace.close("a.js"));
    assert!(workspace.active_name().is_none());
    assert!(workspace.contains("a.js"));
}

#[test]
fn select_and_write_ignore_missing_names() {
    let mut workspace = workspace_with(&["a.js", "b.js"]);

    assert!(!workspace.select("zzz.js"));
    assert!(!workspace.write_content("zzz.js", "x"));
    assert_eq!(workspace.active_name(), Some("b.js"));

    assert!(workspace.write_content("a.js", "x"));
    assert_eq!(workspace.active_name(), Some("b.js"));
    assert_eq!(workspace.get("a.js").unwrap().content, "x");
}

#[test]
fn import_overwrites_in_place_and_selects() {
    let mut workspace = workspace_with(&["a.js", "b.css"]);

    assert!(workspace.import("a.js", "console.log(1)".to_string()));
    assert_eq!(workspace.names().collect::<Vec<_>>(), vec!["a.js", "b.css"]);
    assert_eq!(workspace.get("a.js").unwrap().content, "console.log(1)");
    assert_eq!(workspace.active_name(), Some("a.js"));

    assert!(workspace.import("notes.md", "# hi".to_string()));
    assert_eq!(workspace.get("notes.md").unwrap().language, LanguageTag::PlainText);
    assert_eq!(workspace.active_name(), Some("notes.md"));
}

#[test]
fn persisted_round_trip_is_structurally_equal() {
    let mut workspace = workspace_with(&["index.html", "app.js", "main.py"]);
    workspace.write_content("app.js", "alert('hi')\n");
    workspace.select("app.js");

    let json = workspace.to_persisted().to_json().unwrap();
    let restored = Workspace::from_persisted(PersistedWorkspace::from_json(&json).unwrap());

    assert_eq!(restored, workspace);
    assert_eq!(
        restored.names().collect::<Vec<_>>(),
        vec!["index.html", "app.js", "main.py"]
    );
}

#[test]
fn persisted_shape_uses_active_name_and_lang_keys() {
    let workspace = Workspace::seeded();
    let value: serde_json::Value =
        serde_json::from_str(&workspace.to_persisted().to_json().unwrap()).unwrap();

    assert_eq!(value["activeName"], "index.html");
    assert_eq!(value["files"]["index.html"]["lang"], "html");
    assert_eq!(value["files"]["index.html"]["content"], DEFAULT_FILE_CONTENT);
}

#[test]
fn from_persisted_repairs_stale_selection() {
    let json = r#"{"files":{"a.txt":{"content":"a","lang":"plaintext"},"":{"content":"","lang":"plaintext"}},"activeFile":"gone.txt"}"#;
    let workspace = Workspace::from_persisted(PersistedWorkspace::from_json(json).unwrap());

    assert_eq!(workspace.len(), 1);
    assert_eq!(workspace.active_name(), Some("a.txt"));
    assert!(workspace.is_consistent());
}

#[derive(Debug, Clone)]
enum Op {
    Create(usize),
    Delete(usize),
    Close(usize),
    Select(usize),
}

const NAMES: [&str; 5] = ["a.html", "b.js", "c.css", "d.py", "e.txt"];

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0..NAMES.len();
    prop_oneof![
        idx.clone().prop_map(Op::Create),
        idx.clone().prop_map(Op::Delete),
        idx.clone().prop_map(Op::Close),
        idx.prop_map(Op::Select),
    ]
}

proptest! {
    #[test]
    fn active_name_always_points_at_existing_file(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut workspace = Workspace::new();
        for op in ops {
            match op {
                Op::Create(i) => { workspace.create(NAMES[i]); }
                Op::Delete(i) => { workspace.delete(NAMES[i]); }
                Op::Close(i) => { workspace.close(NAMES[i]); }
                Op::Select(i) => { workspace.select(NAMES[i]); }
            }
            // Closing every tab may leave files without a selection.
            if let Some(active) = workspace.active_name() {
                prop_assert!(workspace.contains(active));
            }
            if workspace.is_empty() {
                prop_assert!(workspace.active_name().is_none());
            }
        }
    }
}
