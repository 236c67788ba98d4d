use crate::kernel::language::FormatDialect;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("formatter unavailable")]
    Unavailable,
    #[error("format failed: {0}")]
    Failed(String),
    #[error("formatter io error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Formatter {
    /// False until the formatter has been located/loaded.
    fn is_ready(&self) -> bool;

    fn format(&self, text: &str, dialect: FormatDialect) -> Result<String, FormatError>;
}
