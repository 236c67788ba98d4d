use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{DownloadError, DownloadSink, PreviewSurface};

/// Delivers downloads as files in a directory.
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Flattens a workspace name into a single path component.
fn sanitize(file_name: &str) -> Result<String, DownloadError> {
    let name: String = file_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        return Err(DownloadError::InvalidName(file_name.to_string()));
    }
    Ok(name)
}

impl DownloadSink for DirectoryDownloads {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), DownloadError> {
        let name = sanitize(file_name)?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "download written");
        Ok(())
    }
}

/// Preview surface that mirrors the current document into a file which a
/// browser can keep open.
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreviewSurface for FilePreview {
    fn load_source(&mut self, source: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "preview directory unavailable");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, source) {
            tracing::warn!(path = %self.path.display(), error = %e, "preview write failed");
        }
    }
}
