use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use keypoints::{KeyPointGrid, LandmarkRasterizer, GRID_SIZE};
use shards::{ShardWriter, Tensor};
use tracing::{debug, info, warn};

use crate::{
    detect::{FaceBox, FaceDetector, LandmarkPredictor},
    error::{PipelineError, Result},
};

/// Default number of (image, grid) pairs per shard.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Directory of face-cropped input images.
    pub input_dir: PathBuf,
    /// Directory shard files are written to. Must already exist.
    pub output_dir: PathBuf,
    /// Shard file name prefix.
    pub prefix: String,
    /// Pairs accumulated in memory before a shard is flushed.
    pub batch_size: usize,
    /// Cells along each axis of the key-point grid.
    pub grid_size: usize,
    /// When set, each face's overlay canvas is saved here as a PNG.
    pub overlay_dir: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("data_records"),
            prefix: "faces".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            grid_size: GRID_SIZE,
            overlay_dir: None,
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images_seen: usize,
    pub images_skipped: usize,
    pub faces_found: usize,
    pub shards_written: usize,
}

/// The in-memory batch. Images and grids are pushed pairwise, so the
/// equal-length invariant holds by construction.
#[derive(Debug, Default)]
struct Batch {
    images: Vec<Tensor>,
    grids: Vec<Tensor>,
}

impl Batch {
    fn push(&mut self, image: Tensor, grid: Tensor) {
        self.images.push(image);
        self.grids.push(grid);
    }

    fn len(&self) -> usize {
        self.images.len()
    }

    fn clear(&mut self) {
        self.images.clear();
        self.grids.clear();
    }
}

/// Sequential data-preparation driver.
///
/// Walks the input directory, runs detection and landmark prediction on
/// each image, rasterizes the landmarks, and flushes batches of pairs to
/// numbered shards. All mutable state (batch, shard counter) is owned
/// here; per-image failures are logged and skipped, shard write failures
/// are fatal.
#[derive(Debug)]
pub struct Driver<D, P> {
    config: DriverConfig,
    detector: D,
    predictor: P,
    rasterizer: LandmarkRasterizer,
    writer: ShardWriter,
    batch: Batch,
    shard_index: u64,
    face_counter: usize,
}

impl<D: FaceDetector, P: LandmarkPredictor> Driver<D, P> {
    /// Builds a driver, rejecting configurations that could never flush a
    /// batch or bin a landmark.
    pub fn new(config: DriverConfig, detector: D, predictor: P) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(PipelineError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        let rasterizer = LandmarkRasterizer::new(config.grid_size)?;
        let writer = ShardWriter::new(&config.output_dir, &config.prefix);
        Ok(Self {
            config,
            detector,
            predictor,
            rasterizer,
            writer,
            batch: Batch::default(),
            shard_index: 0,
            face_counter: 0,
        })
    }

    /// Processes every file in the input directory and writes the shards.
    ///
    /// The trailing batch is always flushed, even when empty, so a run
    /// leaves at least one shard behind.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for path in list_files_sorted(&self.config.input_dir)? {
            summary.images_seen += 1;
            if !self.process_image(&path, &mut summary)? {
                summary.images_skipped += 1;
            }
        }

        self.flush_batch(&mut summary)?;

        info!(
            images = summary.images_seen,
            skipped = summary.images_skipped,
            faces = summary.faces_found,
            shards = summary.shards_written,
            "run complete"
        );
        Ok(summary)
    }

    /// Returns false when the image was skipped because of a recoverable
    /// load or detection failure.
    fn process_image(&mut self, path: &Path, summary: &mut RunSummary) -> Result<bool> {
        let image = match image::open(path) {
            Ok(decoded) => decoded.to_rgb8(),
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable image");
                return Ok(false);
            }
        };

        let faces = match self.detector.detect(&image) {
            Ok(faces) => faces,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping image after detection failure");
                return Ok(false);
            }
        };
        debug!(path = %path.display(), faces = faces.len(), "detected faces");

        for face in &faces {
            let grid = match self.rasterize_face(&image, face) {
                Ok(grid) => grid,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping face");
                    continue;
                }
            };

            summary.faces_found += 1;
            self.face_counter += 1;

            let (width, height) = image.dimensions();
            let image_tensor = Tensor::new(height, width, 3, image.as_raw().clone())?;
            let (grid_h, grid_w, grid_d) = grid.dims();
            let grid_tensor = Tensor::new(grid_h, grid_w, grid_d, grid.into_bytes())?;
            self.batch.push(image_tensor, grid_tensor);

            if self.batch.len() >= self.config.batch_size {
                self.flush_batch(summary)?;
            }
        }

        Ok(true)
    }

    fn rasterize_face(&self, image: &RgbImage, face: &FaceBox) -> Result<KeyPointGrid> {
        let landmarks = self.predictor.predict(image, face)?;
        let (width, height) = image.dimensions();

        if let Some(overlay_dir) = &self.config.overlay_dir {
            let overlay = self.rasterizer.render_overlay(width, height, &landmarks)?;
            let path = overlay_dir.join(format!("overlay_{:05}.png", self.face_counter));
            if let Err(err) = overlay.save(&path) {
                warn!(path = %path.display(), %err, "failed to save overlay");
            }
            return Ok(self.rasterizer.grid_from_overlay(&overlay));
        }

        Ok(self.rasterizer.rasterize(width, height, &landmarks)?)
    }

    fn flush_batch(&mut self, summary: &mut RunSummary) -> Result<()> {
        self.writer
            .write_shard(&self.batch.images, &self.batch.grids, self.shard_index)?;
        self.shard_index += 1;
        summary.shards_written += 1;
        self.batch.clear();
        Ok(())
    }
}

/// Regular files in `dir`, sorted by path so reruns are deterministic.
fn list_files_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
