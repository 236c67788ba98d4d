//! webpad - headless core of a browser code-editor shell
//!
//! Modules:
//! - kernel: workspace model, store (actions/effects), format scheduler,
//!   run/preview dispatch, archive writer, service ports and adapters
//! - models: rope-backed text buffer
//! - app: workbench that executes effects against the collaborators

pub mod app;
pub mod kernel;
pub mod models;
