//! Preview handle entity
//!
//! A scoped resource that lets a caller display a converted output. The
//! resource lives exactly as long as the handle.

use std::any::Any;
use std::fmt;

/// Handle to a displayable copy of a conversion output
pub struct PreviewHandle {
    uri: String,
    resource: Box<dyn Any + Send + Sync>,
}

impl PreviewHandle {
    /// Wraps a resource that is released when the handle is dropped
    pub fn new(uri: impl Into<String>, resource: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            uri: uri.into(),
            resource,
        }
    }

    /// Returns the location the preview can be loaded from
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Releases the underlying resource
    pub fn release(self) {
        drop(self.resource);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle").field("uri", &self.uri).finish()
    }
}
