//! Python runtime backed by a local interpreter process.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::kernel::services::ports::{PythonSettings, RuntimeError, ScriptOutput, ScriptRuntime};

pub struct PythonProcess {
    program: String,
}

impl PythonProcess {
    pub fn new(settings: &PythonSettings) -> Self {
        Self {
            program: settings.program.clone(),
        }
    }
}

/// Last non-empty stderr line, which for a python traceback is the
/// exception itself.
fn error_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| "script exited with an error".to_string())
}

#[async_trait]
impl ScriptRuntime for PythonProcess {
    fn name(&self) -> &'static str {
        "python"
    }

    async fn initialize(&self) -> Result<(), RuntimeError> {
        let output = Command::new(&self.program)
            .args(["-c", "import sys"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RuntimeError::Init(format!("{}: {e}", self.program)))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(RuntimeError::Init(error_line(&output.stderr)))
        }
    }

    async fn execute(&self, code: &str) -> Result<ScriptOutput, RuntimeError> {
        let mut child = Command::new(&self.program)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(code.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(RuntimeError::Execution(error_line(&output.stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = stdout.trim_end();
        Ok(ScriptOutput {
            value: (!value.is_empty()).then(|| value.to_string()),
        })
    }
}
