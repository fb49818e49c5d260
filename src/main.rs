use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

use zip4::application::{ConversionEngine, ConversionOptions};
use zip4::config::EngineConfig;
use zip4::domain::entities::{InputFile, OutputFormat, RasterFormat, TargetCeiling};
use zip4::domain::services::CapabilityCache;
use zip4::infrastructure::{
    ImageCodec, LocalOutputWriter, TempFilePreviewSink, media_type_for_path,
};
use zip4::presentation::cli::{Cli, Commands, ProgressReporter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => EngineConfig::default(),
    };

    let codec = Arc::new(ImageCodec::new());
    let engine = ConversionEngine::new(codec, Arc::new(CapabilityCache::new()))
        .with_config(config)
        .with_preview_sink(Arc::new(TempFilePreviewSink::new()));

    match cli.command {
        Commands::Outputs { file } => list_outputs(&engine, &file).await,
        Commands::Ceilings { file, format } => list_ceilings(&engine, &file, format).await,
        Commands::Probe => probe(&engine).await,
        Commands::Convert {
            file,
            format,
            target,
            max_dimension,
            quality,
            output,
            overwrite,
            preview,
        } => {
            let mut options = ConversionOptions::new();
            options.target_size_ceiling = target;
            options.quality = quality;
            options.preview = preview;
            if let Some(max_dimension) = max_dimension {
                options = options.with_max_dimension(max_dimension);
            }
            convert(&engine, &file, format, &options, &output, overwrite).await
        }
    }
}

async fn open_input(path: &Path) -> Result<InputFile> {
    InputFile::open(path, media_type_for_path(path))
        .await
        .with_context(|| format!("Failed to open {:?}", path))
}

async fn list_outputs(engine: &ConversionEngine, path: &Path) -> Result<()> {
    let file = open_input(path).await?;

    println!(
        "{} ({}, {}, {})",
        style(file.name()).bold(),
        file.media_type(),
        engine.classify(&file),
        file.size_human()
    );
    println!();
    println!(
        "{:<26} {:<16} {}",
        style("FORMAT").bold(),
        style("LABEL").bold(),
        style("STATUS").bold()
    );
    println!("{}", "-".repeat(52));

    for descriptor in engine.catalog(&file).await {
        let status = if descriptor.enabled {
            style("available").green()
        } else {
            style("unavailable").yellow()
        };
        println!("{:<26} {:<16} {}", descriptor.format.id(), descriptor.label, status);
    }
    Ok(())
}

async fn list_ceilings(engine: &ConversionEngine, path: &Path, format: OutputFormat) -> Result<()> {
    let file = open_input(path).await?;
    let ceilings = engine.target_ceilings(&file, format);

    if ceilings.is_empty() {
        println!("No size targets offered for {} as {}", file.name(), format);
        return Ok(());
    }
    for ceiling in ceilings {
        println!("{} ({} bytes)", ceiling.label(), ceiling.bytes());
    }
    Ok(())
}

async fn probe(engine: &ConversionEngine) -> Result<()> {
    for format in RasterFormat::ALL {
        let verdict = if engine.supports(format).await {
            style("yes").green()
        } else {
            style("no").red()
        };
        println!("{:<6} {:<12} {}", format.label(), format.media_type(), verdict);
    }
    Ok(())
}

async fn convert(
    engine: &ConversionEngine,
    path: &Path,
    format: OutputFormat,
    options: &ConversionOptions,
    output_dir: &Path,
    overwrite: bool,
) -> Result<()> {
    let file = open_input(path).await?;

    if let Some(ceiling) = options.target_size_ceiling {
        let offered: Vec<TargetCeiling> = engine.target_ceilings(&file, format);
        if !offered.contains(&ceiling) {
            println!(
                "[!] {} is not offered for this input; encoding at fixed quality",
                style(ceiling.label()).yellow()
            );
        }
    }

    let writer = LocalOutputWriter::new(output_dir)
        .await
        .with_context(|| format!("Failed to prepare output directory {:?}", output_dir))?
        .with_overwrite(overwrite);

    let progress = ProgressReporter::for_conversion(file.name(), format.label());
    let mut result = match engine.convert(&file, format, options).await {
        Ok(result) => result,
        Err(e) => {
            progress.fail("Conversion failed");
            bail!(e);
        }
    };
    progress.finish("Done");

    let saved = writer.write(&result).await?;
    println!(
        "{} {} ({} bytes)",
        style("Saved").green().bold(),
        saved.display(),
        result.len()
    );

    if let Some(preview) = result.preview.take() {
        println!("Preview: {}", preview.uri());
        println!("Press Enter to remove the preview...");
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        preview.release();
    }

    Ok(())
}
