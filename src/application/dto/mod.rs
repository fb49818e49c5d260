//! Data Transfer Objects

mod conversion_options;
mod conversion_result;

pub use conversion_options::{ConversionOptions, MAX_QUALITY, MIN_QUALITY};
pub use conversion_result::ConversionResult;
