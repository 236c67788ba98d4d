use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "vscode_web_files_v2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quiet period after the last edit before auto-format runs.
    pub format_idle_ms: u64,
    pub auto_format: bool,
    pub formatter: FormatterSettings,
    pub python: PythonSettings,
    /// Name of the persisted workspace slot.
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format_idle_ms: 1200,
            auto_format: true,
            formatter: FormatterSettings::default(),
            python: PythonSettings::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            downloads_dir: None,
        }
    }
}

impl Settings {
    pub fn format_idle(&self) -> Duration {
        Duration::from_millis(self.format_idle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterSettings {
    pub program: String,
    pub print_width: u16,
    pub tab_width: u8,
    pub single_quote: bool,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            program: "prettier".to_string(),
            print_width: 80,
            tab_width: 2,
            single_quote: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonSettings {
    pub program: String,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
