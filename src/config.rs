//! Engine configuration
//!
//! Tunables for the conversion engine. Every field has a default, so a
//! configuration file only needs to name what it overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`ConversionEngine`](crate::application::ConversionEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quality used for lossy encodes outside the quality search
    pub default_quality: f32,
    /// Lower bound of the quality search, also the best-effort fallback
    pub quality_floor: f32,
    /// Upper bound of the quality search
    pub quality_ceiling: f32,
    /// Maximum number of encodes performed by the quality search
    pub search_iterations: u32,
    /// Input chunk size for Base64 encoding (multiple of 3)
    pub text_chunk_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_quality: 0.88,
            quality_floor: 0.40,
            quality_ceiling: 0.92,
            search_iterations: 7,
            text_chunk_bytes: 48 * 1024,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read(path)?;
        Self::from_json_slice(&raw)
    }

    /// Parses and validates a JSON configuration document
    pub fn from_json_slice(raw: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a usable search
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |q: f32| q > 0.0 && q <= 1.0;

        if !in_unit(self.quality_floor)
            || !in_unit(self.quality_ceiling)
            || self.quality_floor >= self.quality_ceiling
        {
            return Err(ConfigError::QualityBounds {
                floor: self.quality_floor,
                ceiling: self.quality_ceiling,
            });
        }
        if !in_unit(self.default_quality) {
            return Err(ConfigError::DefaultQuality(self.default_quality));
        }
        if self.search_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.text_chunk_bytes == 0 || self.text_chunk_bytes % 3 != 0 {
            return Err(ConfigError::ChunkSize(self.text_chunk_bytes));
        }
        Ok(())
    }
}
