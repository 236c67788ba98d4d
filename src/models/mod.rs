//! Data models shared by the editing widget.

pub mod text_buffer;

pub use text_buffer::TextBuffer;
