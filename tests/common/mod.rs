//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use zip4::domain::entities::RasterFormat;
use zip4::domain::repositories::{CodecError, PixelSurface, RasterCodec};
use zip4::domain::services::CapabilityCache;
use zip4::ConversionEngine;

pub const MIB: usize = 1024 * 1024;

const MAGIC: &[u8; 4] = b"FAKE";

/// Builds a fake image: magic, width, height, then zero padding up to `len`
pub fn fake_image(width: u32, height: u32, len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len.max(12));
    data.extend_from_slice(MAGIC);
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.resize(len.max(12), 0);
    data
}

/// Reads the dimensions back out of a fake image
pub fn fake_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 12 || &data[..4] != MAGIC {
        return None;
    }
    let width = u32::from_le_bytes(data[4..8].try_into().ok()?);
    let height = u32::from_le_bytes(data[8..12].try_into().ok()?);
    Some((width, height))
}

/// Codec whose output size is `quality * bytes_at_full_quality`
///
/// Decodes only images made by [`fake_image`]; encodes produce the same
/// layout so dimensions can be checked on the output.
pub struct FakeCodec {
    supported: Vec<RasterFormat>,
    fixed_quality: Vec<RasterFormat>,
    bytes_at_full_quality: f64,
    encodes: AtomicUsize,
    probes: AtomicUsize,
    renders: AtomicUsize,
    qualities: Mutex<Vec<f32>>,
}

impl FakeCodec {
    pub fn new(supported: &[RasterFormat], bytes_at_full_quality: usize) -> Self {
        Self {
            supported: supported.to_vec(),
            fixed_quality: Vec::new(),
            bytes_at_full_quality: bytes_at_full_quality as f64,
            encodes: AtomicUsize::new(0),
            probes: AtomicUsize::new(0),
            renders: AtomicUsize::new(0),
            qualities: Mutex::new(Vec::new()),
        }
    }

    /// Supports PNG, JPEG, WebP and GIF, not AVIF, TIFF, HEIC or HEIF
    pub fn typical(bytes_at_full_quality: usize) -> Self {
        Self::new(
            &[
                RasterFormat::Png,
                RasterFormat::Jpeg,
                RasterFormat::WebP,
                RasterFormat::Gif,
            ],
            bytes_at_full_quality,
        )
    }

    /// Makes `formats` encode at full size whatever the quality
    pub fn ignoring_quality(mut self, formats: &[RasterFormat]) -> Self {
        self.fixed_quality = formats.to_vec();
        self
    }

    /// Number of encode calls
    pub fn encodes(&self) -> usize {
        self.encodes.load(Ordering::SeqCst)
    }

    /// Number of capability checks
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Qualities passed to encode, in call order
    pub fn qualities(&self) -> Vec<f32> {
        self.qualities.lock().clone()
    }
}

impl RasterCodec for FakeCodec {
    fn decode(&self, data: &[u8]) -> Result<PixelSurface, CodecError> {
        let (width, height) =
            fake_dimensions(data).ok_or_else(|| CodecError::Decode("not a fake image".into()))?;
        Ok(PixelSurface::blank(width, height))
    }

    fn render(
        &self,
        _surface: &PixelSurface,
        width: u32,
        height: u32,
    ) -> Result<PixelSurface, CodecError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(PixelSurface::blank(width, height))
    }

    fn honors_quality(&self, format: RasterFormat) -> bool {
        format.is_lossy() && !self.fixed_quality.contains(&format)
    }

    fn supports(&self, format: RasterFormat) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.supported.contains(&format)
    }

    fn encode(
        &self,
        surface: &PixelSurface,
        format: RasterFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CodecError> {
        self.encodes.fetch_add(1, Ordering::SeqCst);
        self.qualities.lock().push(quality);
        if !self.supported.contains(&format) {
            return Err(CodecError::Unsupported(format));
        }

        let scale = if self.fixed_quality.contains(&format) {
            1.0
        } else {
            quality as f64
        };
        let len = (scale * self.bytes_at_full_quality) as usize;
        Ok(fake_image(surface.width(), surface.height(), len))
    }
}

/// Engine over `codec` with a fresh capability cache
pub fn engine_with(codec: Arc<FakeCodec>) -> ConversionEngine {
    ConversionEngine::new(codec, Arc::new(CapabilityCache::new()))
}
