use serde::{Deserialize, Serialize};

/// Lower-cased text after the last `.` of a file name. A name without a dot
/// yields the whole name, lower-cased.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase()
}

/// Language tag stored alongside each workspace file and handed to the
/// editing widget.
///
/// Persisted as its plain string form. Tags written by other versions of the
/// store survive a load/save cycle through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageTag {
    JavaScript,
    Html,
    Css,
    Python,
    PlainText,
    Other(String),
}

impl LanguageTag {
    pub fn from_name(name: &str) -> Self {
        Self::from_extension(&extension_of(name))
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "js" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "py" => Self::Python,
            _ => Self::PlainText,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Python => "python",
            Self::PlainText => "plaintext",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for LanguageTag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "javascript" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "python" => Self::Python,
            "plaintext" => Self::PlainText,
            _ => Self::Other(value),
        }
    }
}

impl From<LanguageTag> for String {
    fn from(value: LanguageTag) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the run action treats a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Rendered verbatim in the preview surface.
    Html,
    /// Wrapped in a document and executed inside the preview surface.
    Script,
    /// Handed to the script runtime.
    Python,
    Unsupported,
}

impl RunKind {
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).as_str() {
            "html" | "htm" => Self::Html,
            "js" => Self::Script,
            "py" => Self::Python,
            _ => Self::Unsupported,
        }
    }
}

/// Parser family passed to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatDialect {
    Html,
    Css,
    Script,
}

impl FormatDialect {
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).as_str() {
            "html" => Self::Html,
            "css" => Self::Css,
            _ => Self::Script,
        }
    }

    /// Parser name understood by prettier.
    pub fn parser_name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Script => "babel",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
