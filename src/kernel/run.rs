use super::language::{extension_of, RunKind};

/// What the run action does with the active file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPlan {
    /// Load this document into the preview surface.
    Preview { source: String, script: bool },
    /// Execute through the script runtime.
    Runtime { name: String, code: String },
    Unsupported { extension: String },
}

pub fn plan(name: &str, content: &str) -> RunPlan {
    match RunKind::from_name(name) {
        RunKind::Html => RunPlan::Preview {
            source: content.to_string(),
            script: false,
        },
        RunKind::Script => RunPlan::Preview {
            source: script_document(content),
            script: true,
        },
        RunKind::Python => RunPlan::Runtime {
            name: name.to_string(),
            code: content.to_string(),
        },
        RunKind::Unsupported => RunPlan::Unsupported {
            extension: extension_of(name),
        },
    }
}

/// Minimal page executing `code` as an inline script.
pub fn script_document(code: &str) -> String {
    let mut doc = String::with_capacity(code.len() + 96);
    doc.push_str("<!doctype html>\n<html>\n<head>\n<meta charset='utf-8'>\n</head>\n<body>\n<script>\n");
    doc.push_str(code);
    doc.push_str("\n</script>\n</body>\n</html>");
    doc
}
