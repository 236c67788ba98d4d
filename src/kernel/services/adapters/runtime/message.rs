use crate::kernel::services::ports::{RuntimeError, ScriptOutput};

#[derive(Debug)]
pub enum AppMessage {
    RuntimeReady {
        runtime: &'static str,
        elapsed_ms: u128,
    },
    ScriptFinished {
        name: String,
        result: Result<ScriptOutput, RuntimeError>,
    },
}
