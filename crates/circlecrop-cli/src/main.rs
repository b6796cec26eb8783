//! circlecrop CLI: detect, mask, crop and export circular regions of an image tree.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use circlecrop::{
    parse_compression, parse_resolutions, DirectorySink, HoughConfig, OutputExtension,
    OutputPathResolver, Pipeline, PipelineConfig, UsageError,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "circlecrop")]
#[command(
    about = "Detect circles in every image of a folder tree, remove the background and export square crops at several resolutions"
)]
#[command(version)]
struct Cli {
    /// Folder scanned recursively for images.
    source: PathBuf,

    /// Folder receiving the crops; the source structure is mirrored below it.
    destination: PathBuf,

    /// Output extension: .png, .jpg, .jpeg or .bmp (leading dot optional).
    #[arg(default_value = ".png", value_parser = OutputExtension::from_str)]
    extension: OutputExtension,

    /// PNG compression level (<= 3 fast, 4..=6 default, >= 7 best).
    #[arg(default_value = "0", allow_negative_numbers = true, value_parser = parse_compression)]
    compression: i32,

    /// Square output resolutions, e.g. "[1000,500,250]".
    #[arg(default_value = "[1000]", value_parser = parse_resolution_list)]
    resolutions: Resolutions,

    /// JSON file overriding the circle detector parameters.
    #[arg(long)]
    detector_config: Option<PathBuf>,

    /// Folder receiving downscaled PNGs of every intermediate stage.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Path to write the run report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct Resolutions(Vec<u32>);

fn parse_resolution_list(s: &str) -> Result<Resolutions, UsageError> {
    parse_resolutions(s).map(Resolutions)
}

impl Cli {
    fn to_config(&self) -> CliResult<PipelineConfig> {
        let mut config = PipelineConfig::default();
        if let Some(path) = &self.detector_config {
            config.hough = HoughConfig::from_json_file(path)?;
            tracing::info!("Detector config loaded from {}", path.display());
        }
        config.export.extension = self.extension.clone();
        config.export.compression = self.compression;
        config.export.resolutions = self.resolutions.0.clone();
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = cli.to_config()?;
    let preview = config.preview;
    let resolver = OutputPathResolver::new(&cli.source, &cli.destination);

    let mut pipeline = Pipeline::new(config, resolver);
    if let Some(dir) = &cli.debug_dir {
        tracing::info!("Diagnostic images written to {}", dir.display());
        pipeline = pipeline.with_diagnostics(DirectorySink::new(dir, preview));
    }

    let report = pipeline.run()?;

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, &json)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}
