//! Raster codec backed by the `image` crate
//!
//! Decodes PNG, JPEG, WebP, GIF, TIFF and BMP. Encodes PNG, JPEG, WebP
//! (lossless only, quality is ignored), GIF and TIFF. AVIF, HEIC and HEIF
//! are reported as unsupported, so the capability probe turns them off.

use crate::domain::entities::RasterFormat;
use crate::domain::repositories::{CodecError, PixelSurface, RasterCodec};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};
use std::io::Cursor;

/// [`RasterCodec`] implementation on top of `image`
#[derive(Debug, Clone, Copy)]
pub struct ImageCodec {
    filter: FilterType,
}

impl ImageCodec {
    /// Creates a codec that resamples with Lanczos3
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterCodec for ImageCodec {
    fn decode(&self, data: &[u8]) -> Result<PixelSurface, CodecError> {
        let decoded =
            image::load_from_memory(data).map_err(|e| CodecError::Decode(e.to_string()))?;
        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        PixelSurface::new(width, height, rgba.into_raw())
    }

    fn render(
        &self,
        surface: &PixelSurface,
        width: u32,
        height: u32,
    ) -> Result<PixelSurface, CodecError> {
        let source = to_rgba_image(surface)?;
        let (width, height) = (width.max(1), height.max(1));
        let resized = image::imageops::resize(&source, width, height, self.filter);
        PixelSurface::new(width, height, resized.into_raw())
    }

    fn encode(
        &self,
        surface: &PixelSurface,
        format: RasterFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CodecError> {
        let (width, height) = surface.dimensions();
        let mut out = Vec::new();

        match format {
            RasterFormat::Png | RasterFormat::Gif | RasterFormat::Tiff => {
                let container = match format {
                    RasterFormat::Png => ImageFormat::Png,
                    RasterFormat::Gif => ImageFormat::Gif,
                    _ => ImageFormat::Tiff,
                };
                DynamicImage::ImageRgba8(to_rgba_image(surface)?)
                    .write_to(&mut Cursor::new(&mut out), container)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            RasterFormat::Jpeg => {
                // JPEG carries no alpha channel
                let rgb = DynamicImage::ImageRgba8(to_rgba_image(surface)?).into_rgb8();
                JpegEncoder::new_with_quality(&mut out, quality_percent(quality))
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            RasterFormat::WebP => {
                WebPEncoder::new_lossless(&mut out)
                    .write_image(surface.pixels(), width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            RasterFormat::Avif | RasterFormat::Heic | RasterFormat::Heif => {
                return Err(CodecError::Unsupported(format));
            }
        }

        Ok(out)
    }

    fn honors_quality(&self, format: RasterFormat) -> bool {
        // WebP is written lossless
        matches!(format, RasterFormat::Jpeg)
    }
}

/// Maps a (0, 1] quality onto the encoder's 1..=100 scale
pub fn quality_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn to_rgba_image(surface: &PixelSurface) -> Result<RgbaImage, CodecError> {
    RgbaImage::from_raw(surface.width(), surface.height(), surface.pixels().to_vec()).ok_or_else(
        || {
            CodecError::InvalidSurface(format!(
                "{}x{} surface has {} bytes",
                surface.width(),
                surface.height(),
                surface.pixels().len()
            ))
        },
    )
}
