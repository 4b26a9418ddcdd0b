use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use pipeline::{Driver, DriverConfig, FullFrameDetector, MeanShapePredictor, DEFAULT_BATCH_SIZE};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prepare (image, key-point grid) record shards from a directory of
/// face-cropped images.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the 68-point landmark predictor model file
    model: PathBuf,

    /// Directory of input face images
    #[arg(short, long, default_value = "data")]
    input_dir: PathBuf,

    /// Directory the shard files are written to
    #[arg(short, long, default_value = "data_records")]
    output_dir: PathBuf,

    /// Shard file name prefix
    #[arg(long, default_value = "faces")]
    prefix: String,

    /// Record pairs per shard
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Cells along each axis of the key-point grid
    #[arg(long, default_value_t = 16)]
    grid_size: usize,

    /// Also save each face's overlay canvas as a PNG into this directory
    #[arg(long)]
    dump_overlays: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.output_dir)?;
    if let Some(overlay_dir) = &cli.dump_overlays {
        std::fs::create_dir_all(overlay_dir)?;
    }

    let predictor = MeanShapePredictor::load(&cli.model)?;
    info!(model = %cli.model.display(), "loaded landmark predictor");

    let config = DriverConfig {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        prefix: cli.prefix,
        batch_size: cli.batch_size,
        grid_size: cli.grid_size,
        overlay_dir: cli.dump_overlays,
    };

    let mut driver = Driver::new(config, FullFrameDetector, predictor)?;
    let summary = driver.run()?;

    info!(
        images = summary.images_seen,
        skipped = summary.images_skipped,
        faces = summary.faces_found,
        shards = summary.shards_written,
        "done"
    );
    Ok(())
}
