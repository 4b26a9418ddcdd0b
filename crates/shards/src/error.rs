use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShardError {
    #[error("image count {images} does not match grid count {grids}")]
    ShapeMismatch { images: usize, grids: usize },

    #[error("output directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("tensor buffer holds {actual} bytes but dimensions require {expected}")]
    TensorSize { expected: usize, actual: usize },

    #[error("shard truncated inside a record, {complete} complete records before the cut")]
    TruncatedShard { complete: usize },

    #[error("record encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShardError>;
