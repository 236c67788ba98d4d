//! Formatter backed by an external `prettier` executable.
//!
//! Source is piped through stdin and the formatted text read back from
//! stdout. The executable is located lazily with a `--version` probe; until
//! the probe succeeds the formatter reports itself as not ready.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use crate::kernel::language::FormatDialect;
use crate::kernel::services::ports::{FormatError, Formatter, FormatterSettings};

pub struct PrettierFormatter {
    settings: FormatterSettings,
    ready: OnceLock<bool>,
}

impl PrettierFormatter {
    pub fn new(settings: FormatterSettings) -> Self {
        Self {
            settings,
            ready: OnceLock::new(),
        }
    }

    fn probe(&self) -> bool {
        let status = Command::new(&self.settings.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => {
                tracing::info!(program = %self.settings.program, "formatter available");
                true
            }
            Ok(status) => {
                tracing::warn!(program = %self.settings.program, %status, "formatter probe failed");
                false
            }
            Err(e) => {
                tracing::info!(program = %self.settings.program, error = %e, "formatter not found");
                false
            }
        }
    }

    fn args(&self, dialect: FormatDialect) -> Vec<String> {
        let mut args = vec![
            "--parser".to_string(),
            dialect.parser_name().to_string(),
            "--print-width".to_string(),
            self.settings.print_width.to_string(),
            "--tab-width".to_string(),
            self.settings.tab_width.to_string(),
        ];
        if self.settings.single_quote {
            args.push("--single-quote".to_string());
        }
        args
    }
}

impl Formatter for PrettierFormatter {
    fn is_ready(&self) -> bool {
        *self.ready.get_or_init(|| self.probe())
    }

    fn format(&self, text: &str, dialect: FormatDialect) -> Result<String, FormatError> {
        if !self.is_ready() {
            return Err(FormatError::Unavailable);
        }

        let mut child = Command::new(&self.settings.program)
            .args(self.args(dialect))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatError::Failed("formatter stdin unavailable".to_string()))?;
        // stdout must be drained while stdin is still being written.
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(result) => result?,
            Err(_) => return Err(FormatError::Failed("formatter stdin writer panicked".into())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("formatter exited with an error")
                .trim()
                .to_string();
            return Err(FormatError::Failed(message));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::Failed(format!("formatter output is not utf-8: {e}")))
    }
}

/// Formatter that is never ready; every format is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFormatter;

impl Formatter for NoFormatter {
    fn is_ready(&self) -> bool {
        false
    }

    fn format(&self, _text: &str, _dialect: FormatDialect) -> Result<String, FormatError> {
        Err(FormatError::Unavailable)
    }
}
