//! Format classifier service
//!
//! Assigns an input to a [`FormatClass`] from its declared media type and
//! its name suffix. Pure: no I/O and no access to the content.

use crate::domain::entities::{FormatClass, InputFile};

const IMAGE_MEDIA_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/bmp",
    "image/x-ms-bmp",
    "image/svg+xml",
    "image/avif",
    "image/heic",
    "image/heif",
    "image/tiff",
];

const IMAGE_SUFFIXES: &[&str] = &["heic", "heif", "tif", "tiff", "bmp", "svg"];
const TEXT_SUFFIXES: &[&str] = &["md", "txt", "log", "json", "csv"];

/// Classifies an input file
pub fn classify(file: &InputFile) -> FormatClass {
    classify_parts(file.name(), file.media_type())
}

/// Classifies a (name, media type) pair
///
/// Classes are tested in precedence order Image, JSON, CSV, Text. Each test
/// looks at the media type first and falls back to the name suffix.
pub fn classify_parts(name: &str, media_type: &str) -> FormatClass {
    let media_type = essence(media_type);
    let suffix = suffix(name);
    let suffix_in = |set: &[&str]| suffix.as_deref().is_some_and(|s| set.contains(&s));

    if IMAGE_MEDIA_TYPES.contains(&media_type.as_str()) || suffix_in(IMAGE_SUFFIXES) {
        return FormatClass::Image;
    }
    if media_type == "application/json" || suffix_in(&["json"]) {
        return FormatClass::Json;
    }
    if media_type == "text/csv" || suffix_in(&["csv"]) {
        return FormatClass::Csv;
    }
    if media_type.starts_with("text/") || suffix_in(TEXT_SUFFIXES) {
        return FormatClass::Text;
    }
    FormatClass::Generic
}

/// Lowercased media type without parameters
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Lowercased text after the last dot, if any
fn suffix(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
