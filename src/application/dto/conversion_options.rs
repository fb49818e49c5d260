//! Conversion options DTO

use crate::domain::entities::TargetCeiling;
use std::num::NonZeroU32;

/// Lowest quality a caller may request
pub const MIN_QUALITY: f32 = 0.40;
/// Highest quality a caller may request
pub const MAX_QUALITY: f32 = 0.95;

/// Options for a single conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    /// Byte-size target for lossy raster outputs
    pub target_size_ceiling: Option<TargetCeiling>,
    /// Longest allowed side of a raster output (downscale only)
    pub max_dimension: Option<NonZeroU32>,
    /// Encoder quality for lossy raster outputs, in [0.40, 0.95]
    pub quality: Option<f32>,
    /// Whether to publish a preview of raster outputs
    pub preview: bool,
}

impl ConversionOptions {
    /// Creates options with everything unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size ceiling
    pub fn with_ceiling(mut self, ceiling: TargetCeiling) -> Self {
        self.target_size_ceiling = Some(ceiling);
        self
    }

    /// Sets the maximum dimension; zero clears it
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = NonZeroU32::new(max_dimension);
        self
    }

    /// Sets the encoder quality
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Requests a preview handle
    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }

    /// Returns the requested quality clamped to the allowed range, or `default`
    pub fn effective_quality(&self, default: f32) -> f32 {
        self.quality
            .filter(|q| q.is_finite())
            .map(|q| q.clamp(MIN_QUALITY, MAX_QUALITY))
            .unwrap_or(default)
    }
}
