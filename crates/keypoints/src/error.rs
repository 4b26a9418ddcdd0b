use thiserror::Error;

use crate::LANDMARK_COUNT;

#[derive(Error, Debug)]
pub enum KeypointError {
    #[error("invalid landmark count: expected {expected}, found {found}")]
    InvalidLandmarkCount {
        expected: usize,
        found: usize,
    },

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),
}

impl KeypointError {
    pub(crate) fn invalid_count(found: usize) -> Self {
        Self::InvalidLandmarkCount {
            expected: LANDMARK_COUNT,
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, KeypointError>;
