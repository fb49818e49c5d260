//! CLI commands using clap

use crate::domain::entities::{OutputFormat, TargetCeiling};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// zip4 - Local File Converter
///
/// Converts one file at a time: store-only ZIP, Base64, SHA-256, image
/// re-encoding with size targets, and CSV/JSON transcoding. Nothing leaves
/// the machine.
#[derive(Parser, Debug)]
#[command(name = "zip4")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a single file locally", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// JSON file overriding engine defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the outputs available for a file
    Outputs {
        /// Input file
        file: PathBuf,
    },

    /// List the size targets offered for a file and output format
    Ceilings {
        /// Input file
        file: PathBuf,

        /// Output format (e.g. jpeg, webp, image/avif)
        #[arg(short, long)]
        format: OutputFormat,
    },

    /// Report which image formats this build can encode
    Probe,

    /// Convert a file
    Convert {
        /// Input file
        file: PathBuf,

        /// Output format (zip, base64, sha256, png, jpeg, webp, avif, gif,
        /// tiff, heic, heif, txt, json-pretty, json-min, csv, json)
        #[arg(short, long)]
        format: OutputFormat,

        /// Size target for lossy image outputs (2MB, 5MB or 7MB)
        #[arg(short, long)]
        target: Option<TargetCeiling>,

        /// Longest side of an image output in pixels; never upscales
        #[arg(short, long)]
        max_dimension: Option<u32>,

        /// Encoder quality for lossy image outputs (0.40 to 0.95)
        #[arg(short, long)]
        quality: Option<f32>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,

        /// Publish a temporary preview of image outputs and print its location
        #[arg(long)]
        preview: bool,
    },
}
