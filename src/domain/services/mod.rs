//! Domain services
//!
//! Conversion logic that operates on domain entities. Everything here is
//! independent of the concrete codec and of the file system.

pub mod archive;
pub mod capability;
pub mod catalog;
pub mod classifier;
pub mod crc32;
pub mod digest;
pub mod naming;
pub mod raster;
pub mod structured_text;

pub use archive::{ArchiveError, build_archive};
pub use capability::{CapabilityCache, CapabilityProbe};
pub use catalog::{catalog, is_legal, target_ceilings};
pub use classifier::classify;
pub use crc32::crc32;
pub use digest::{checksum_hex, text_encode};
pub use naming::{base_name, output_file_name};
pub use raster::{QualityBounds, SearchOutcome, fit_within, search_quality};
pub use structured_text::{TranscodeError, csv_from_json, json_from_csv, json_minify, json_pretty};
