//! # Offline face-landmark shard preparation
//!
//! Sequential, single-threaded driver that turns a directory of face
//! images into shard files of (image, key-point grid) record pairs.
//! Face detection and landmark prediction are external collaborators
//! behind the [`FaceDetector`] and [`LandmarkPredictor`] traits; the
//! rasterization and shard format live in the `keypoints` and `shards`
//! crates.

pub mod detect;
pub mod driver;
pub mod error;
pub mod predict;

pub use detect::{FaceBox, FaceDetector, FullFrameDetector, LandmarkPredictor};
pub use driver::{Driver, DriverConfig, RunSummary, DEFAULT_BATCH_SIZE};
pub use error::{PipelineError, Result};
pub use predict::MeanShapePredictor;
