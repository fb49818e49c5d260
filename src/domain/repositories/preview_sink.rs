//! Preview sink trait
//!
//! Defines where displayable copies of conversion outputs are published.

use crate::domain::entities::PreviewHandle;
use std::io;

/// Trait for publishing a preview of converted bytes
///
/// The returned handle owns the published resource; dropping or releasing
/// it removes the preview.
pub trait PreviewSink: Send + Sync {
    /// Publishes `data` and returns a handle to it
    fn publish(&self, data: &[u8], extension: &str) -> Result<PreviewHandle, io::Error>;
}
