//! Domain entities
//!
//! Core objects that describe an input, what it can become, and the
//! resources handed back with a result.

mod format_class;
mod input_file;
mod output_format;
mod preview;
mod target_ceiling;

pub use format_class::FormatClass;
pub use input_file::InputFile;
pub use output_format::{OutputDescriptor, OutputFormat, ParseFormatError, RasterFormat};
pub use preview::PreviewHandle;
pub use target_ceiling::{ParseCeilingError, TargetCeiling};
