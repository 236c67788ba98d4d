/// Isolated document surface used for live preview and script runs.
pub trait PreviewSurface {
    fn load_source(&mut self, source: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("invalid download name: {0:?}")]
    InvalidName(String),
    #[error("download io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives user downloads (single-file export and project archive).
pub trait DownloadSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), DownloadError>;
}
