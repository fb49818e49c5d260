//! Application layer
//!
//! The conversion use case that orchestrates domain services and ports.

mod convert_file;
pub mod dto;

pub use convert_file::ConversionEngine;
pub use dto::{ConversionOptions, ConversionResult};
