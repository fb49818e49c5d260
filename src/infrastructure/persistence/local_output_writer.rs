//! Local output writer
//!
//! Saves conversion results under an output directory using the suggested
//! download name.

use crate::application::ConversionResult;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;

/// Errors raised while saving an output
#[derive(Error, Debug)]
pub enum OutputWriteError {
    #[error("Output already exists: {0}")]
    FileExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Output name {0:?} is not a plain file name")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Writes conversion results to the local file system
#[derive(Debug)]
pub struct LocalOutputWriter {
    output_dir: PathBuf,
    overwrite: bool,
    files_written: AtomicUsize,
    bytes_written: AtomicU64,
}

impl LocalOutputWriter {
    /// Creates a writer over `output_dir`, creating the directory if needed
    pub async fn new(output_dir: &Path) -> Result<Self, OutputWriteError> {
        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                OutputWriteError::PermissionDenied(output_dir.display().to_string())
            } else {
                OutputWriteError::IoError(e)
            }
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            overwrite: false,
            files_written: AtomicUsize::new(0),
            bytes_written: AtomicU64::new(0),
        })
    }

    /// Allows existing files to be replaced
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Saves `result` and returns the path written
    pub async fn write(&self, result: &ConversionResult) -> Result<PathBuf, OutputWriteError> {
        let name = Path::new(&result.file_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(OutputWriteError::InvalidName(result.file_name.clone()));
        }

        let path = self.output_dir.join(name);
        if !self.overwrite && tokio::fs::try_exists(&path).await? {
            return Err(OutputWriteError::FileExists(path.display().to_string()));
        }

        tokio::fs::write(&path, &result.bytes).await?;

        self.files_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(result.len() as u64, Ordering::Relaxed);
        tracing::debug!("Wrote {} bytes to {}", result.len(), path.display());

        Ok(path)
    }

    /// Returns the number of files written
    pub fn files_written(&self) -> usize {
        self.files_written.load(Ordering::Relaxed)
    }

    /// Returns the number of bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}
