//! Output catalog service
//!
//! Builds the ordered list of outputs offered for an input, and the menu
//! of size ceilings offered for a lossy output.

use super::capability::CapabilityProbe;
use super::classifier::classify;
use crate::domain::entities::{
    FormatClass, InputFile, OutputDescriptor, OutputFormat, RasterFormat, TargetCeiling,
};

const MIB: u64 = 1024 * 1024;

/// Inputs at or above this size are offered the 7 MB and 5 MB ceilings
pub const LARGE_INPUT_BYTES: u64 = 10 * MIB;
/// Inputs at or above this size are offered the 2 MB ceiling
pub const MEDIUM_INPUT_BYTES: u64 = 5 * MIB;

/// Outputs every input can be converted to, in catalog order
pub const UNIVERSAL_OUTPUTS: [OutputFormat; 3] = [
    OutputFormat::Archive,
    OutputFormat::TextEncoding,
    OutputFormat::Checksum,
];

/// Builds the output catalog for `file`
///
/// The list is never empty and always starts with the universal outputs.
pub async fn catalog(file: &InputFile, probe: &CapabilityProbe) -> Vec<OutputDescriptor> {
    let class = classify(file);
    let mut outputs: Vec<OutputDescriptor> = UNIVERSAL_OUTPUTS
        .iter()
        .map(|f| OutputDescriptor::enabled(*f))
        .collect();

    if class == FormatClass::Image {
        for raster in [RasterFormat::Png, RasterFormat::Jpeg, RasterFormat::WebP] {
            outputs.push(OutputDescriptor::enabled(OutputFormat::Raster(raster)));
        }

        // AVIF is only listed when it works; the rest are listed disabled
        if probe.supports(RasterFormat::Avif).await {
            outputs.push(OutputDescriptor::enabled(OutputFormat::Raster(RasterFormat::Avif)));
        }
        for raster in [
            RasterFormat::Gif,
            RasterFormat::Tiff,
            RasterFormat::Heic,
            RasterFormat::Heif,
        ] {
            let supported = probe.supports(raster).await;
            outputs.push(OutputDescriptor::new(OutputFormat::Raster(raster), supported));
        }
    }

    if class.is_text_eligible() {
        outputs.push(OutputDescriptor::enabled(OutputFormat::PlainText));
    }
    if class == FormatClass::Json {
        outputs.push(OutputDescriptor::enabled(OutputFormat::JsonPretty));
        outputs.push(OutputDescriptor::enabled(OutputFormat::JsonMinify));
        outputs.push(OutputDescriptor::enabled(OutputFormat::CsvFromJson));
    }
    if class == FormatClass::Csv {
        outputs.push(OutputDescriptor::enabled(OutputFormat::JsonFromCsv));
    }

    outputs
}

/// Returns the size ceilings offered for converting `file` to `format`
pub fn target_ceilings(file: &InputFile, format: OutputFormat) -> Vec<TargetCeiling> {
    ceilings_for_size(file.size(), format)
}

/// Size-tier rule behind [`target_ceilings`]
pub fn ceilings_for_size(size: u64, format: OutputFormat) -> Vec<TargetCeiling> {
    if !format.is_lossy_raster() {
        return Vec::new();
    }
    if size >= LARGE_INPUT_BYTES {
        vec![TargetCeiling::Mb7, TargetCeiling::Mb5]
    } else if size >= MEDIUM_INPUT_BYTES {
        vec![TargetCeiling::Mb2]
    } else {
        Vec::new()
    }
}

/// Returns true if `format` is a legal output for an input of `class`
pub fn is_legal(class: FormatClass, format: OutputFormat) -> bool {
    match format {
        OutputFormat::Archive | OutputFormat::TextEncoding | OutputFormat::Checksum => true,
        OutputFormat::Raster(_) => class == FormatClass::Image,
        OutputFormat::PlainText => class.is_text_eligible(),
        OutputFormat::JsonPretty | OutputFormat::JsonMinify | OutputFormat::CsvFromJson => {
            class == FormatClass::Json
        }
        OutputFormat::JsonFromCsv => class == FormatClass::Csv,
    }
}
