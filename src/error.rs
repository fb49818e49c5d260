use crate::domain::entities::{FormatClass, OutputFormat, RasterFormat};
use std::io;
use thiserror::Error;

/// Errors that can end a single conversion attempt
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Cannot convert a {class} input to {format}")]
    UnsupportedConversion {
        format: OutputFormat,
        class: FormatClass,
    },

    #[error("This environment cannot encode {0}")]
    UnsupportedEncoding(RasterFormat),

    #[error("Input could not be decoded: {0}")]
    DecodeFailure(String),

    #[error("Encoder produced no usable output: {0}")]
    EncodeFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConversionError {
    /// Returns true for failures detected before any byte of the input was read
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ConversionError::UnsupportedConversion { .. } | ConversionError::UnsupportedEncoding(_)
        )
    }
}

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid quality bounds: floor {floor} must be below ceiling {ceiling} within (0, 1]")]
    QualityBounds { floor: f32, ceiling: f32 },

    #[error("Default quality {0} is outside (0, 1]")]
    DefaultQuality(f32),

    #[error("search_iterations must be at least 1")]
    ZeroIterations,

    #[error("text_chunk_bytes must be a non-zero multiple of 3, got {0}")]
    ChunkSize(usize),
}
