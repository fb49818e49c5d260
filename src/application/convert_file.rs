//! Conversion engine
//!
//! Routes a (file, output format, options) request to the component that
//! produces it. Classification and capability checks run before the input is
//! read; every attempt works on its own buffers, so a failure leaves nothing
//! behind but an error.

use crate::application::dto::{ConversionOptions, ConversionResult};
use crate::config::EngineConfig;
use crate::domain::entities::{
    FormatClass, InputFile, OutputDescriptor, OutputFormat, PreviewHandle, RasterFormat,
    TargetCeiling,
};
use crate::domain::repositories::{CodecError, PixelSurface, PreviewSink, RasterCodec};
use crate::domain::services::{
    CapabilityCache, CapabilityProbe, QualityBounds, build_archive, catalog, checksum_hex,
    classify, csv_from_json, fit_within, is_legal, json_from_csv, json_minify, json_pretty,
    output_file_name, search_quality, target_ceilings, text_encode,
};
use crate::error::ConversionError;
use bytes::Bytes;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

/// Conversion engine
///
/// Owns the raster codec, the capability probe (over a cache supplied by the
/// caller) and an optional preview sink.
///
/// # Example
///
/// ```ignore
/// let codec = Arc::new(ImageCodec::new());
/// let engine = ConversionEngine::new(codec, Arc::new(CapabilityCache::new()));
/// let file = InputFile::from_bytes("notes.csv", "text/csv", "a,b\n1,2\n");
/// let result = engine.convert(&file, OutputFormat::JsonFromCsv, &ConversionOptions::new()).await?;
/// assert_eq!(result.file_name, "notes.json");
/// ```
pub struct ConversionEngine {
    codec: Arc<dyn RasterCodec>,
    probe: CapabilityProbe,
    preview_sink: Option<Arc<dyn PreviewSink>>,
    config: EngineConfig,
}

impl ConversionEngine {
    /// Creates an engine with the default configuration
    pub fn new(codec: Arc<dyn RasterCodec>, capabilities: Arc<CapabilityCache>) -> Self {
        let probe = CapabilityProbe::new(Arc::clone(&codec), capabilities);
        Self {
            codec,
            probe,
            preview_sink: None,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables preview publication through `sink`
    pub fn with_preview_sink(mut self, sink: Arc<dyn PreviewSink>) -> Self {
        self.preview_sink = Some(sink);
        self
    }

    /// Returns the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the capability cache shared with this engine
    pub fn capabilities(&self) -> &Arc<CapabilityCache> {
        self.probe.cache()
    }

    /// Classifies `file`
    pub fn classify(&self, file: &InputFile) -> FormatClass {
        classify(file)
    }

    /// Returns the outputs offered for `file`
    pub async fn catalog(&self, file: &InputFile) -> Vec<OutputDescriptor> {
        catalog(file, &self.probe).await
    }

    /// Returns the size ceilings offered for converting `file` to `format`
    ///
    /// Empty when the codec does not let quality control the size of `format`.
    pub fn target_ceilings(&self, file: &InputFile, format: OutputFormat) -> Vec<TargetCeiling> {
        match format.raster() {
            Some(raster) if self.codec.honors_quality(raster) => target_ceilings(file, format),
            _ => Vec::new(),
        }
    }

    /// Returns whether `format` can be encoded in this environment
    pub async fn supports(&self, format: RasterFormat) -> bool {
        self.probe.supports(format).await
    }

    /// Converts `file` to `format`
    pub async fn convert(
        &self,
        file: &InputFile,
        format: OutputFormat,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, ConversionError> {
        let start_time = Instant::now();
        let class = classify(file);
        if !is_legal(class, format) {
            return Err(ConversionError::UnsupportedConversion { format, class });
        }

        tracing::info!(
            "Converting {} ({}, {}) to {}",
            file.name(),
            class,
            file.size_human(),
            format
        );

        let bytes = match format {
            OutputFormat::Raster(raster) => self.reencode(file, raster, options).await?,
            OutputFormat::Archive => {
                let name = file.name().to_owned();
                let data = file.read_all().await?;
                run_blocking(ConversionError::EncodeFailure, move || {
                    build_archive(&name, &data)
                        .map(Bytes::from)
                        .map_err(|e| ConversionError::EncodeFailure(e.to_string()))
                })
                .await?
            }
            OutputFormat::TextEncoding => {
                let chunk = self.config.text_chunk_bytes;
                let data = file.read_all().await?;
                run_blocking(ConversionError::EncodeFailure, move || {
                    let mut text = text_encode(&data, chunk);
                    text.push('\n');
                    Ok(Bytes::from(text))
                })
                .await?
            }
            OutputFormat::Checksum => {
                let data = file.read_all().await?;
                run_blocking(ConversionError::EncodeFailure, move || {
                    let mut hex = checksum_hex(&data);
                    hex.push('\n');
                    Ok(Bytes::from(hex))
                })
                .await?
            }
            OutputFormat::PlainText => file.read_all().await?,
            OutputFormat::JsonPretty => {
                let data = file.read_all().await?;
                json_pretty(&data).map(Bytes::from).map_err(decode_failure)?
            }
            OutputFormat::JsonMinify => {
                let data = file.read_all().await?;
                json_minify(&data).map(Bytes::from).map_err(decode_failure)?
            }
            OutputFormat::CsvFromJson => {
                let data = file.read_all().await?;
                csv_from_json(&data).map(Bytes::from).map_err(decode_failure)?
            }
            OutputFormat::JsonFromCsv => {
                let data = file.read_all().await?;
                json_from_csv(&data).map(Bytes::from).map_err(decode_failure)?
            }
        };

        let mut result = ConversionResult::new(bytes, output_file_name(file.name(), format));
        if options.preview && format.raster().is_some() {
            result.preview = self.publish_preview(&result.bytes, format).await;
        }

        tracing::info!(
            "Conversion complete: {} ({} bytes) in {:.2}s",
            result.file_name,
            result.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(result)
    }

    /// Re-encodes an image input as `format`
    ///
    /// Decodes, fits within `options.max_dimension`, then either runs the
    /// quality search (lossy format with an offered ceiling) or encodes once.
    pub async fn reencode(
        &self,
        file: &InputFile,
        format: RasterFormat,
        options: &ConversionOptions,
    ) -> Result<Bytes, ConversionError> {
        let class = classify(file);
        if class != FormatClass::Image {
            return Err(ConversionError::UnsupportedConversion {
                format: OutputFormat::Raster(format),
                class,
            });
        }
        if !self.probe.supports(format).await {
            return Err(ConversionError::UnsupportedEncoding(format));
        }

        let data = file.read_all().await?;
        let surface = Arc::new(
            self.decode_and_fit(data, options.max_dimension.map(NonZeroU32::get))
                .await?,
        );

        let offered = self.target_ceilings(file, OutputFormat::Raster(format));
        let ceiling = options.target_size_ceiling.filter(|c| offered.contains(c));

        if let Some(ceiling) = ceiling {
            let bounds = QualityBounds {
                floor: self.config.quality_floor,
                ceiling: self.config.quality_ceiling,
                iterations: self.config.search_iterations,
            };
            let outcome = search_quality(ceiling.bytes(), bounds, |quality| {
                self.encode(Arc::clone(&surface), format, quality)
            })
            .await?;

            if outcome.within_ceiling {
                tracing::info!(
                    "Quality search for {} settled at {:.3} ({} bytes, {} encodes)",
                    ceiling,
                    outcome.quality,
                    outcome.bytes.len(),
                    outcome.encodes
                );
            } else {
                tracing::warn!(
                    "No quality fits {}; returning best effort at {:.2} ({} bytes)",
                    ceiling,
                    outcome.quality,
                    outcome.bytes.len()
                );
            }
            return Ok(outcome.bytes);
        }

        if let Some(requested) = options.target_size_ceiling {
            tracing::debug!(
                "Ceiling {} not offered for {} as {}; encoding at fixed quality",
                requested,
                file.name(),
                format
            );
        }

        let quality = options.effective_quality(self.config.default_quality);
        self.encode(surface, format, quality).await
    }

    async fn decode_and_fit(
        &self,
        data: Bytes,
        max_dimension: Option<u32>,
    ) -> Result<PixelSurface, ConversionError> {
        let codec = Arc::clone(&self.codec);
        run_blocking(ConversionError::DecodeFailure, move || {
            let decoded = codec
                .decode(&data)
                .map_err(|e| ConversionError::DecodeFailure(e.to_string()))?;

            let (width, height) = decoded.dimensions();
            let (target_width, target_height) = fit_within(width, height, max_dimension);
            if (target_width, target_height) == (width, height) {
                return Ok(decoded);
            }

            tracing::debug!(
                "Downscaling {}x{} to {}x{}",
                width,
                height,
                target_width,
                target_height
            );
            codec
                .render(&decoded, target_width, target_height)
                .map_err(codec_failure)
        })
        .await
    }

    async fn encode(
        &self,
        surface: Arc<PixelSurface>,
        format: RasterFormat,
        quality: f32,
    ) -> Result<Bytes, ConversionError> {
        let codec = Arc::clone(&self.codec);
        let encoded = run_blocking(ConversionError::EncodeFailure, move || {
            codec
                .encode(&surface, format, quality)
                .map_err(codec_failure)
        })
        .await?;

        if encoded.is_empty() {
            return Err(ConversionError::EncodeFailure(format!(
                "{} encoder returned no bytes",
                format
            )));
        }
        Ok(Bytes::from(encoded))
    }

    async fn publish_preview(&self, bytes: &Bytes, format: OutputFormat) -> Option<PreviewHandle> {
        let sink = Arc::clone(self.preview_sink.as_ref()?);
        let data = bytes.clone();
        let extension = format.extension();

        match tokio::task::spawn_blocking(move || sink.publish(&data, extension)).await {
            Ok(Ok(handle)) => Some(handle),
            Ok(Err(e)) => {
                tracing::warn!("Preview publication failed: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Preview task did not complete: {}", e);
                None
            }
        }
    }
}

/// Runs CPU-bound work off the control flow and waits for it
async fn run_blocking<T, F>(
    on_abort: fn(String) -> ConversionError,
    task: F,
) -> Result<T, ConversionError>
where
    F: FnOnce() -> Result<T, ConversionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| on_abort(format!("worker task did not complete: {}", e)))?
}

fn codec_failure(error: CodecError) -> ConversionError {
    match error {
        CodecError::Unsupported(format) => ConversionError::UnsupportedEncoding(format),
        CodecError::Decode(message) => ConversionError::DecodeFailure(message),
        other => ConversionError::EncodeFailure(other.to_string()),
    }
}

fn decode_failure(error: impl std::fmt::Display) -> ConversionError {
    ConversionError::DecodeFailure(error.to_string())
}
