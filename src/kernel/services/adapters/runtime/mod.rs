//! Async runtime adapter: runs script executions off the UI thread and sends
//! their results back as messages.

mod host;
mod message;
mod runtime;

pub use host::ScriptHost;
pub use message::AppMessage;
pub use runtime::AsyncRuntime;
