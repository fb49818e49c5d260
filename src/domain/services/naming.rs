//! Output file naming

use crate::domain::entities::OutputFormat;

/// Strips the last extension from `name`
///
/// A trailing `.ext` is removed only if it is non-empty and contains no
/// path separator. A name that would become empty is returned unchanged.
pub fn base_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() && !ext.contains('/') => base,
        _ => name,
    }
}

/// Returns `<base>.<ext>` for a conversion of `input_name` to `format`
pub fn output_file_name(input_name: &str, format: OutputFormat) -> String {
    format!("{}.{}", base_name(input_name), format.extension())
}
