use super::*;
use tempfile::tempdir;

#[test]
fn settings_path_lives_under_app_dir() {
    let Some(path) = get_settings_path() else {
        return;
    };
    assert!(path.ends_with(".webpad/settings.json"));
}

#[test]
fn default_file_is_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".webpad").join("settings.json");

    write_default_if_missing(&path).unwrap();
    assert_eq!(load_settings_from(&path), Some(Settings::default()));

    std::fs::write(&path, r#"{"format_idle_ms": 300}"#).unwrap();
    write_default_if_missing(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.format_idle_ms, 300);
    assert!(loaded.auto_format);
}

#[test]
fn malformed_or_missing_settings_yield_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    assert!(load_settings_from(&path).is_none());

    std::fs::write(&path, "{ nope").unwrap();
    assert!(load_settings_from(&path).is_none());
}
