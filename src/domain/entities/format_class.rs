//! Format class entity
//!
//! The semantic class an input belongs to. Derived from the declared media
//! type and the file name, never stored.

use std::fmt;

/// Semantic class of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatClass {
    /// Raster or vector image
    Image,
    /// Plain text
    Text,
    /// JSON document (also text)
    Json,
    /// Comma-separated values (also text)
    Csv,
    /// Anything else
    Generic,
}

impl FormatClass {
    /// Returns true if the input may be passed through as plain text
    pub fn is_text_eligible(&self) -> bool {
        matches!(self, FormatClass::Text | FormatClass::Json | FormatClass::Csv)
    }

    /// Returns a human-readable name for this class
    pub fn name(&self) -> &'static str {
        match self {
            FormatClass::Image => "image",
            FormatClass::Text => "text",
            FormatClass::Json => "JSON",
            FormatClass::Csv => "CSV",
            FormatClass::Generic => "generic",
        }
    }
}

impl fmt::Display for FormatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
