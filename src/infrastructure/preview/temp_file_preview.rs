//! Temporary-file preview sink
//!
//! Publishes a preview as a named temporary file. The file is deleted when
//! the returned handle is released or dropped.

use crate::domain::entities::PreviewHandle;
use crate::domain::repositories::PreviewSink;
use std::io::{self, Write};
use std::path::PathBuf;

const PREFIX: &str = "zip4-preview-";

/// [`PreviewSink`] writing into a directory of temporary files
#[derive(Debug, Clone)]
pub struct TempFilePreviewSink {
    dir: PathBuf,
}

impl TempFilePreviewSink {
    /// Creates a sink over the system temporary directory
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    /// Creates a sink over `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for TempFilePreviewSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSink for TempFilePreviewSink {
    fn publish(&self, data: &[u8], extension: &str) -> Result<PreviewHandle, io::Error> {
        let suffix = format!(".{}", extension);
        let mut file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        file.write_all(data)?;
        file.flush()?;

        let path = file.into_temp_path();
        let uri = format!("file://{}", path.display());
        tracing::debug!("Published {} byte preview at {}", data.len(), uri);

        Ok(PreviewHandle::new(uri, Box::new(path)))
    }
}
