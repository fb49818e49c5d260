//! Input file entity
//!
//! Represents the single file handed to the engine for one conversion.
//! The content is only read when a conversion actually needs it.

use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Content {
    Memory(Bytes),
    Disk(PathBuf),
}

/// A user-supplied file with its declared metadata
#[derive(Debug, Clone)]
pub struct InputFile {
    /// File name as presented by the user, including the extension
    name: String,
    /// Declared media type (may be empty)
    media_type: String,
    /// Size of the content in bytes
    size: u64,
    content: Content,
}

impl InputFile {
    /// Creates an input backed by bytes already in memory
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: data.len() as u64,
            content: Content::Memory(data),
        }
    }

    /// Creates an input backed by a file on disk
    ///
    /// Only the metadata is read here; the content is read by [`read_all`](Self::read_all).
    pub async fn open(path: &Path, media_type: impl Into<String>) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} does not name a file", path.display()),
                )
            })?;

        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        Ok(Self {
            name,
            media_type: media_type.into(),
            size: metadata.len(),
            content: Content::Disk(path.to_path_buf()),
        })
    }

    /// Returns the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared media type
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Reads the full content
    pub async fn read_all(&self) -> io::Result<Bytes> {
        match &self.content {
            Content::Memory(data) => Ok(data.clone()),
            Content::Disk(path) => tokio::fs::read(path).await.map(Bytes::from),
        }
    }

    /// Returns a human-readable size string
    pub fn size_human(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if self.size >= GB {
            format!("{:.2} GB", self.size as f64 / GB as f64)
        } else if self.size >= MB {
            format!("{:.2} MB", self.size as f64 / MB as f64)
        } else if self.size >= KB {
            format!("{:.2} KB", self.size as f64 / KB as f64)
        } else {
            format!("{} bytes", self.size)
        }
    }
}
