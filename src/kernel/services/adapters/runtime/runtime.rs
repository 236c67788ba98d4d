use super::host::ScriptHost;
use super::message::AppMessage;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    host: Arc<ScriptHost>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, host: Arc<ScriptHost>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx, host })
    }

    /// Executes `code` in the background; the result comes back as
    /// `AppMessage::ScriptFinished` tagged with `name`.
    pub fn run_script(&self, name: String, code: String) {
        let tx = self.tx.clone();
        let host = self.host.clone();
        self.runtime.spawn(async move {
            match host.ensure_ready().await {
                Ok(Some(elapsed)) => {
                    tracing::info!(runtime = host.name(), ?elapsed, "script runtime ready");
                    let _ = tx.send(AppMessage::RuntimeReady {
                        runtime: host.name(),
                        elapsed_ms: elapsed.as_millis(),
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        runtime = host.name(),
                        error = %e,
                        "script runtime failed to start"
                    );
                    let _ = tx.send(AppMessage::ScriptFinished {
                        name,
                        result: Err(e),
                    });
                    return;
                }
            }

            let result = host.execute(&code).await;
            if let Err(e) = &result {
                tracing::debug!(name = %name, error = %e, "script failed");
            }
            let _ = tx.send(AppMessage::ScriptFinished { name, result });
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
