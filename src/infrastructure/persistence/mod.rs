//! Output persistence

mod local_output_writer;

pub use local_output_writer::{LocalOutputWriter, OutputWriteError};
