//! Preview sinks

mod temp_file_preview;

pub use temp_file_preview::TempFilePreviewSink;
