//! Repository traits (interfaces)
//!
//! These traits define the contracts for the platform capabilities the
//! engine depends on. Concrete adapters live in the infrastructure layer.

mod preview_sink;
mod raster_codec;

pub use preview_sink::PreviewSink;
pub use raster_codec::{CodecError, PROBE_QUALITY, PixelSurface, RasterCodec};
