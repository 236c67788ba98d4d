use super::*;
use crate::kernel::language::LanguageTag;
use crate::kernel::services::adapters::HeadlessWidget;

fn registry() -> BufferRegistry {
    BufferRegistry::new(Box::new(HeadlessWidget::new()))
}

fn file(content: &str, language: LanguageTag) -> WorkspaceFile {
    WorkspaceFile {
        content: content.to_string(),
        language,
    }
}

#[test]
fn open_creates_buffer_once() {
    let mut buffers = registry();
    let js = file("let a;", LanguageTag::JavaScript);

    let first = buffers.open("a.js", &js);
    let second = buffers.open("a.js", &js);

    assert_eq!(first, second);
    assert_eq!(buffers.len(), 1);
    assert_eq!(buffers.widget().buffer_count(), 1);
    assert_eq!(buffers.active_name(), Some("a.js"));
    assert_eq!(buffers.name_of(first), Some("a.js"));
}

#[test]
fn open_reapplies_file_language() {
    let mut buffers = registry();
    let id = buffers.open("x", &file("", LanguageTag::PlainText));
    buffers.open("x", &file("", LanguageTag::Python));
    assert_eq!(buffers.widget().language(id), Some(LanguageTag::Python));
}

#[test]
fn dispose_removes_both_directions() {
    let mut buffers = registry();
    let id = buffers.open("a.js", &file("", LanguageTag::JavaScript));

    assert!(buffers.dispose("a.js"));
    assert!(!buffers.dispose("a.js"));
    assert!(buffers.name_of(id).is_none());
    assert_eq!(buffers.widget().buffer_count(), 0);
    assert!(buffers.active_name().is_none());
}

#[test]
fn reload_only_touches_existing_buffers() {
    let mut buffers = registry();
    assert!(!buffers.reload("a.js", "x"));

    let id = buffers.ensure("a.js", &file("old", LanguageTag::JavaScript));
    assert!(buffers.reload("a.js", "new"));
    assert_eq!(buffers.widget().text(id).as_deref(), Some("new"));
}

#[test]
fn clear_active_keeps_buffers_alive() {
    let mut buffers = registry();
    buffers.open("a.js", &file("", LanguageTag::JavaScript));
    buffers.clear_active();

    assert!(buffers.active_name().is_none());
    assert!(buffers.contains("a.js"));
}

#[test]
fn uri_uses_model_scheme() {
    assert_eq!(buffer_uri("index.html"), "inmemory://model/index.html");
}
