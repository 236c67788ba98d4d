use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Stringified result; `None` when the script produced nothing.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("runtime failed to initialize: {0}")]
    Init(String),
    #[error("{0}")]
    Execution(String),
    #[error("runtime io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        RuntimeError::Io(e.to_string())
    }
}

/// Embedded language runtime. `initialize` is the cold start and is invoked
/// at most once per successful start by the host.
#[async_trait]
pub trait ScriptRuntime: Send + Sync {
    fn name(&self) -> &'static str;

    async fn initialize(&self) -> Result<(), RuntimeError>;

    async fn execute(&self, code: &str) -> Result<ScriptOutput, RuntimeError>;
}
