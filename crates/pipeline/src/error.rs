use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("face detection failed: {0}")]
    Detection(String),

    #[error("landmark prediction failed: {0}")]
    Prediction(String),

    #[error("invalid predictor model: {0}")]
    Model(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("rasterization error: {0}")]
    Keypoints(#[from] keypoints::KeypointError),

    #[error("shard error: {0}")]
    Shards(#[from] shards::ShardError),

    #[error("model file error: {0}")]
    ModelFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
