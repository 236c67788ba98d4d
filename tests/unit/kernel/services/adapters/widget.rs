use super::*;

fn drain(widget: &mut HeadlessWidget) -> Vec<WidgetEvent> {
    std::iter::from_fn(|| widget.poll_event()).collect()
}

#[test]
fn create_assigns_distinct_ids() {
    let mut widget = HeadlessWidget::new();
    let a = widget.create_buffer("inmemory://model/a.js", "a", &LanguageTag::JavaScript);
    let b = widget.create_buffer("inmemory://model/b.js", "b", &LanguageTag::JavaScript);

    assert_ne!(a, b);
    assert_eq!(widget.buffer_count(), 2);
    assert_eq!(widget.uri(a), Some("inmemory://model/a.js"));
    assert_eq!(widget.text(b).as_deref(), Some("b"));
    assert_eq!(widget.pending_events(), 0);
}

#[test]
fn type_text_emits_content_then_cursor() {
    let mut widget = HeadlessWidget::new();
    let id = widget.create_buffer("u", "", &LanguageTag::PlainText);

    widget.type_text(id, "ab\ncd");
    assert_eq!(
        drain(&mut widget),
        vec![
            WidgetEvent::ContentChanged { buffer: id },
            WidgetEvent::CursorMoved {
                buffer: id,
                position: CursorPosition::new(1, 2),
            },
        ]
    );
    assert_eq!(widget.text(id).as_deref(), Some("ab\ncd"));
}

#[test]
fn set_text_always_emits_content_changed() {
    let mut widget = HeadlessWidget::new();
    let id = widget.create_buffer("u", "same", &LanguageTag::PlainText);

    widget.set_text(id, "same");
    assert_eq!(
        drain(&mut widget),
        vec![WidgetEvent::ContentChanged { buffer: id }]
    );
}

#[test]
fn set_cursor_is_clamped() {
    let mut widget = HeadlessWidget::new();
    let id = widget.create_buffer("u", "one\ntwo", &LanguageTag::PlainText);

    widget.set_cursor(id, CursorPosition::new(9, 9));
    assert_eq!(widget.cursor(id), Some(CursorPosition::new(1, 3)));
}

#[test]
fn dispose_drops_queued_events_and_active() {
    let mut widget = HeadlessWidget::new();
    let id = widget.create_buffer("u", "", &LanguageTag::PlainText);
    widget.set_active(Some(id));
    widget.type_text(id, "x");

    assert!(widget.dispose_buffer(id));
    assert!(!widget.dispose_buffer(id));
    assert_eq!(widget.active(), None);
    assert!(widget.poll_event().is_none());
}

#[test]
fn set_active_ignores_unknown_buffer() {
    let mut widget = HeadlessWidget::new();
    widget.set_active(Some(BufferId::new(77)));
    assert_eq!(widget.active(), None);
}

#[test]
fn language_can_be_reassigned() {
    let mut widget = HeadlessWidget::new();
    let id = widget.create_buffer("u", "", &LanguageTag::PlainText);
    widget.set_language(id, &LanguageTag::Python);
    assert_eq!(widget.language(id), Some(LanguageTag::Python));
}
