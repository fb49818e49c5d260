//! zip4 - local single-file conversion engine
//!
//! Takes one file and produces one output: a store-only ZIP archive, a
//! Base64 encoding, a SHA-256 checksum, a re-encoded image (optionally
//! downscaled and fitted under a size target), or a CSV/JSON transcoding.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use zip4::{ConversionEngine, ConversionOptions, InputFile, OutputFormat};
//! use zip4::domain::services::CapabilityCache;
//! use zip4::infrastructure::ImageCodec;
//!
//! let codec = Arc::new(ImageCodec::new());
//! let engine = ConversionEngine::new(codec, Arc::new(CapabilityCache::new()));
//! let file = InputFile::from_bytes("notes.csv", "text/csv", "a,b\n1,2\n");
//! let result = engine.convert(&file, OutputFormat::JsonFromCsv, &ConversionOptions::new()).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{ConversionEngine, ConversionOptions, ConversionResult};
pub use config::EngineConfig;
pub use domain::entities::{
    FormatClass, InputFile, OutputDescriptor, OutputFormat, PreviewHandle, RasterFormat,
    TargetCeiling,
};
pub use error::{ConfigError, ConversionError};
