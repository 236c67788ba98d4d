//! Application layer: the workbench that executes kernel effects against the
//! editor widget and the other collaborators.

pub mod workbench;

pub use workbench::{Collaborators, Workbench};
