//! Raster codec implementations

mod image_codec;

pub use image_codec::{ImageCodec, quality_percent};
