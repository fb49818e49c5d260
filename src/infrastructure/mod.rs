//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories.
//! This layer contains the codec, preview and file system code.

pub mod codecs;
pub mod media_type;
pub mod persistence;
pub mod preview;

pub use codecs::ImageCodec;
pub use media_type::media_type_for_path;
pub use persistence::{LocalOutputWriter, OutputWriteError};
pub use preview::TempFilePreviewSink;
