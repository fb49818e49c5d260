//! Media type inference from file names
//!
//! Used when an input arrives from disk without a declared media type.

use std::path::Path;

/// Media type used when the extension is unknown
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Infers a media type from the extension of `path`
pub fn media_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| media_type_for_extension(&ext.to_ascii_lowercase()))
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

fn media_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tif" | "tiff" => "image/tiff",
        "json" => "application/json",
        "csv" => "text/csv",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "pdf" => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}
