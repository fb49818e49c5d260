//! Target size ceiling entity

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// A byte-size target for lossy raster outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetCeiling {
    Mb2,
    Mb5,
    Mb7,
}

impl TargetCeiling {
    /// Returns the ceiling in bytes
    pub fn bytes(&self) -> u64 {
        match self {
            TargetCeiling::Mb2 => 2 * MIB,
            TargetCeiling::Mb5 => 5 * MIB,
            TargetCeiling::Mb7 => 7 * MIB,
        }
    }

    /// Returns the menu label
    pub fn label(&self) -> &'static str {
        match self {
            TargetCeiling::Mb2 => "≤2MB",
            TargetCeiling::Mb5 => "≤5MB",
            TargetCeiling::Mb7 => "≤7MB",
        }
    }
}

impl fmt::Display for TargetCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a ceiling label is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown size ceiling: {0} (expected 2MB, 5MB or 7MB)")]
pub struct ParseCeilingError(pub String);

impl FromStr for TargetCeiling {
    type Err = ParseCeilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_start_matches('≤')
            .trim_start_matches("<=")
            .trim_start_matches('<')
            .to_ascii_uppercase();
        match trimmed.as_str() {
            "2MB" | "2" => Ok(TargetCeiling::Mb2),
            "5MB" | "5" => Ok(TargetCeiling::Mb5),
            "7MB" | "7" => Ok(TargetCeiling::Mb7),
            _ => Err(ParseCeilingError(s.to_string())),
        }
    }
}
