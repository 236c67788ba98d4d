use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::kernel::services::ports::{RuntimeError, ScriptOutput, ScriptRuntime};

#[derive(Default)]
struct StartState {
    /// Error of the most recent attempt, tagged with its generation.
    last_failure: Option<(u64, RuntimeError)>,
}

/// Owns a script runtime and its one-time cold start.
///
/// Concurrent callers share a single in-flight initialization and all get
/// its outcome, success or failure. A failed start leaves the host cold so
/// a later request tries again.
pub struct ScriptHost {
    runtime: Arc<dyn ScriptRuntime>,
    ready: AtomicBool,
    /// Number of finished start attempts.
    attempts: AtomicU64,
    start: Mutex<StartState>,
}

impl ScriptHost {
    pub fn new(runtime: Arc<dyn ScriptRuntime>) -> Self {
        Self {
            runtime,
            ready: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
            start: Mutex::new(StartState::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.runtime.name()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Returns the cold-start duration when this call performed the start.
    pub async fn ensure_ready(&self) -> Result<Option<Duration>, RuntimeError> {
        if self.is_ready() {
            return Ok(None);
        }
        let seen = self.attempts.load(Ordering::Acquire);

        let mut start = self.start.lock().await;
        if self.is_ready() {
            return Ok(None);
        }
        // An attempt finished while this caller was queued behind it.
        if let Some((generation, error)) = &start.last_failure {
            if *generation > seen {
                return Err(error.clone());
            }
        }

        let started = Instant::now();
        let result = self.runtime.initialize().await;
        let generation = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        match result {
            Ok(()) => {
                start.last_failure = None;
                self.ready.store(true, Ordering::Release);
                Ok(Some(started.elapsed()))
            }
            Err(e) => {
                start.last_failure = Some((generation, e.clone()));
                Err(e)
            }
        }
    }

    pub async fn execute(&self, code: &str) -> Result<ScriptOutput, RuntimeError> {
        self.ensure_ready().await?;
        self.runtime.execute(code).await
    }
}
