//! Capability probe service
//!
//! Answers "can this environment encode format X?" by attempting a real
//! 1x1 encode, and remembers each answer for the life of its cache.

use crate::domain::entities::RasterFormat;
use crate::domain::repositories::RasterCodec;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoized probe results
///
/// Entries are only ever added. The first recorded answer for a format is
/// kept; a later probe of the same format cannot overwrite it.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    entries: RwLock<HashMap<RasterFormat, bool>>,
}

impl CapabilityCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-filled with known answers
    pub fn seeded(entries: impl IntoIterator<Item = (RasterFormat, bool)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Returns the recorded answer for `format`, if any
    pub fn get(&self, format: RasterFormat) -> Option<bool> {
        self.entries.read().get(&format).copied()
    }

    /// Records an answer and returns the value now stored
    pub fn record(&self, format: RasterFormat, supported: bool) -> bool {
        *self.entries.write().entry(format).or_insert(supported)
    }

    /// Returns the number of formats probed so far
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been probed yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns all recorded answers sorted by format
    pub fn snapshot(&self) -> Vec<(RasterFormat, bool)> {
        let mut entries: Vec<_> = self.entries.read().iter().map(|(f, s)| (*f, *s)).collect();
        entries.sort();
        entries
    }
}

/// Probes the raster codec for encoder support
#[derive(Clone)]
pub struct CapabilityProbe {
    codec: Arc<dyn RasterCodec>,
    cache: Arc<CapabilityCache>,
}

impl CapabilityProbe {
    /// Creates a probe over `codec` that records into `cache`
    pub fn new(codec: Arc<dyn RasterCodec>, cache: Arc<CapabilityCache>) -> Self {
        Self { codec, cache }
    }

    /// Returns whether `format` can be encoded
    ///
    /// Two first-time probes of the same format may both run; the cache
    /// keeps whichever answer lands first.
    pub async fn supports(&self, format: RasterFormat) -> bool {
        if let Some(known) = self.cache.get(format) {
            return known;
        }

        let codec = Arc::clone(&self.codec);
        let supported = match tokio::task::spawn_blocking(move || codec.supports(format)).await {
            Ok(supported) => supported,
            Err(e) => {
                tracing::warn!("Capability probe for {} did not complete: {}", format, e);
                false
            }
        };

        tracing::debug!(%format, supported, "capability probed");
        self.cache.record(format, supported)
    }

    /// Returns the cache this probe records into
    pub fn cache(&self) -> &Arc<CapabilityCache> {
        &self.cache
    }
}
