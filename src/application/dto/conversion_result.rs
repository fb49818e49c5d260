//! Conversion result DTO

use crate::domain::entities::PreviewHandle;
use bytes::Bytes;

/// Output of a successful conversion
#[derive(Debug)]
pub struct ConversionResult {
    /// Converted bytes
    pub bytes: Bytes,
    /// Suggested download name
    pub file_name: String,
    /// Preview of the output, if one was requested and published
    pub preview: Option<PreviewHandle>,
}

impl ConversionResult {
    /// Creates a result without a preview
    pub fn new(bytes: Bytes, file_name: String) -> Self {
        Self {
            bytes,
            file_name,
            preview: None,
        }
    }

    /// Returns the output size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the output is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Releases the preview, if any, and returns the bytes and name
    pub fn into_parts(self) -> (Bytes, String) {
        if let Some(preview) = self.preview {
            preview.release();
        }
        (self.bytes, self.file_name)
    }
}
