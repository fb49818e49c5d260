//! Output format entity
//!
//! The closed set of encodings a conversion can produce, and the descriptor
//! the catalog hands back for each of them.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raster encodings the engine can request from a codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RasterFormat {
    Png,
    Jpeg,
    WebP,
    Avif,
    Gif,
    Tiff,
    Heic,
    Heif,
}

impl RasterFormat {
    /// Every raster format, in catalog order
    pub const ALL: [RasterFormat; 8] = [
        RasterFormat::Png,
        RasterFormat::Jpeg,
        RasterFormat::WebP,
        RasterFormat::Avif,
        RasterFormat::Gif,
        RasterFormat::Tiff,
        RasterFormat::Heic,
        RasterFormat::Heif,
    ];

    /// Returns the media type of this format
    pub fn media_type(&self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
            RasterFormat::WebP => "image/webp",
            RasterFormat::Avif => "image/avif",
            RasterFormat::Gif => "image/gif",
            RasterFormat::Tiff => "image/tiff",
            RasterFormat::Heic => "image/heic",
            RasterFormat::Heif => "image/heif",
        }
    }

    /// Returns the canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
            RasterFormat::WebP => "webp",
            RasterFormat::Avif => "avif",
            RasterFormat::Gif => "gif",
            RasterFormat::Tiff => "tiff",
            RasterFormat::Heic => "heic",
            RasterFormat::Heif => "heif",
        }
    }

    /// Returns the short label shown in a catalog
    pub fn label(&self) -> &'static str {
        match self {
            RasterFormat::Png => "PNG",
            RasterFormat::Jpeg => "JPG",
            RasterFormat::WebP => "WEBP",
            RasterFormat::Avif => "AVIF",
            RasterFormat::Gif => "GIF",
            RasterFormat::Tiff => "TIFF",
            RasterFormat::Heic => "HEIC",
            RasterFormat::Heif => "HEIF",
        }
    }

    /// Returns true for encoders that take a quality parameter
    pub fn is_lossy(&self) -> bool {
        matches!(self, RasterFormat::Jpeg | RasterFormat::WebP | RasterFormat::Avif)
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A conversion target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Single-entry store-only ZIP
    Archive,
    /// Base64 text
    TextEncoding,
    /// SHA-256 hex digest
    Checksum,
    /// Re-encoded image
    Raster(RasterFormat),
    /// Unmodified text
    PlainText,
    /// JSON re-serialized with 2-space indentation
    JsonPretty,
    /// JSON re-serialized without whitespace
    JsonMinify,
    /// CSV built from a JSON array of objects
    CsvFromJson,
    /// JSON array of objects built from CSV
    JsonFromCsv,
}

impl OutputFormat {
    /// Returns the stable identifier of this format
    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::Archive => "application/zip",
            OutputFormat::TextEncoding => "text/plain;base64",
            OutputFormat::Checksum => "text/plain;sha256",
            OutputFormat::Raster(raster) => raster.media_type(),
            OutputFormat::PlainText => "text/plain",
            OutputFormat::JsonPretty => "application/json;pretty",
            OutputFormat::JsonMinify => "application/json;minify",
            OutputFormat::CsvFromJson => "text/csv;from-json",
            OutputFormat::JsonFromCsv => "application/json;from-csv",
        }
    }

    /// Returns the short label shown in a catalog
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Archive => "ZIP",
            OutputFormat::TextEncoding => "BASE64",
            OutputFormat::Checksum => "SHA-256",
            OutputFormat::Raster(raster) => raster.label(),
            OutputFormat::PlainText => "TXT",
            OutputFormat::JsonPretty => "JSON (pretty)",
            OutputFormat::JsonMinify => "JSON (minified)",
            OutputFormat::CsvFromJson => "CSV",
            OutputFormat::JsonFromCsv => "JSON",
        }
    }

    /// Returns the suffix appended to the input's base name
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Archive => "zip",
            OutputFormat::TextEncoding => "base64.txt",
            OutputFormat::Checksum => "sha256.txt",
            OutputFormat::Raster(raster) => raster.extension(),
            OutputFormat::PlainText => "txt",
            OutputFormat::JsonPretty => "pretty.json",
            OutputFormat::JsonMinify => "min.json",
            OutputFormat::CsvFromJson => "csv",
            OutputFormat::JsonFromCsv => "json",
        }
    }

    /// Returns the raster format if this is an image output
    pub fn raster(&self) -> Option<RasterFormat> {
        match self {
            OutputFormat::Raster(raster) => Some(*raster),
            _ => None,
        }
    }

    /// Returns true for lossy raster outputs
    pub fn is_lossy_raster(&self) -> bool {
        self.raster().is_some_and(|r| r.is_lossy())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a format identifier is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown output format: {0}")]
pub struct ParseFormatError(pub String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "application/zip" | "zip" => OutputFormat::Archive,
            "text/plain;base64" | "base64" => OutputFormat::TextEncoding,
            "text/plain;sha256" | "sha256" | "sha-256" => OutputFormat::Checksum,
            "image/png" | "png" => OutputFormat::Raster(RasterFormat::Png),
            "image/jpeg" | "jpeg" | "jpg" => OutputFormat::Raster(RasterFormat::Jpeg),
            "image/webp" | "webp" => OutputFormat::Raster(RasterFormat::WebP),
            "image/avif" | "avif" => OutputFormat::Raster(RasterFormat::Avif),
            "image/gif" | "gif" => OutputFormat::Raster(RasterFormat::Gif),
            "image/tiff" | "tiff" | "tif" => OutputFormat::Raster(RasterFormat::Tiff),
            "image/heic" | "heic" => OutputFormat::Raster(RasterFormat::Heic),
            "image/heif" | "heif" => OutputFormat::Raster(RasterFormat::Heif),
            "text/plain" | "txt" | "text" => OutputFormat::PlainText,
            "application/json;pretty" | "json-pretty" => OutputFormat::JsonPretty,
            "application/json;minify" | "json-min" => OutputFormat::JsonMinify,
            "text/csv;from-json" | "csv" => OutputFormat::CsvFromJson,
            "application/json;from-csv" | "json" => OutputFormat::JsonFromCsv,
            _ => return Err(ParseFormatError(s.to_string())),
        };
        Ok(format)
    }
}

/// An entry of the output catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// The format this entry converts to
    pub format: OutputFormat,
    /// Display label
    pub label: &'static str,
    /// Whether the conversion can currently be performed
    pub enabled: bool,
}

impl OutputDescriptor {
    /// Creates an enabled descriptor
    pub fn enabled(format: OutputFormat) -> Self {
        Self::new(format, true)
    }

    /// Creates a descriptor with an explicit enabled flag
    pub fn new(format: OutputFormat, enabled: bool) -> Self {
        Self {
            format,
            label: format.label(),
            enabled,
        }
    }
}
