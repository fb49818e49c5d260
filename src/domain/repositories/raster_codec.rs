//! Raster codec trait
//!
//! Defines the interface to whatever decodes, renders and encodes pixels.
//! The engine never talks to an image library directly.

use crate::domain::entities::RasterFormat;
use thiserror::Error;

/// Quality handed to the encoder when probing a format
pub const PROBE_QUALITY: f32 = 0.88;

/// Errors raised by a raster codec
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Unsupported format: {0}")]
    Unsupported(RasterFormat),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid surface: {0}")]
    InvalidSurface(String),
}

/// A decoded image as 8-bit RGBA pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelSurface {
    /// Creates a surface from raw RGBA pixels
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(CodecError::InvalidSurface(format!(
                "{}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Creates an opaque white surface
    pub fn blank(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            rgba: vec![0xFF; width as usize * height as usize * 4],
        }
    }

    /// Returns the width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the RGBA pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

/// Trait for decoding and encoding raster images
///
/// Implementations are called from blocking worker threads, one operation
/// at a time per call, and must not keep state between calls.
///
/// # Example
///
/// ```ignore
/// let codec = ImageCodec::new();
/// let surface = codec.decode(&png_bytes)?;
/// let small = codec.render(&surface, 64, 64)?;
/// let jpeg = codec.encode(&small, RasterFormat::Jpeg, 0.8)?;
/// ```
pub trait RasterCodec: Send + Sync {
    /// Decodes encoded image bytes into a surface
    fn decode(&self, data: &[u8]) -> Result<PixelSurface, CodecError>;

    /// Draws `surface` scaled onto a new surface of the given size
    fn render(&self, surface: &PixelSurface, width: u32, height: u32)
    -> Result<PixelSurface, CodecError>;

    /// Encodes a surface
    ///
    /// `quality` is in (0, 1] and is ignored by lossless formats.
    fn encode(
        &self,
        surface: &PixelSurface,
        format: RasterFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CodecError>;

    /// Returns true if `quality` controls the encoded size of `format`
    ///
    /// Size ceilings are only offered for formats where this holds.
    fn honors_quality(&self, format: RasterFormat) -> bool {
        format.is_lossy()
    }

    /// Checks whether `format` can be produced, by encoding a 1x1 surface
    fn supports(&self, format: RasterFormat) -> bool {
        self.encode(&PixelSurface::blank(1, 1), format, PROBE_QUALITY)
            .is_ok_and(|bytes| !bytes.is_empty())
    }
}
