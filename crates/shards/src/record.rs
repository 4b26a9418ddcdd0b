use serde::{Deserialize, Serialize};

use crate::error::{Result, ShardError};

/// A dense H×W×D byte buffer with its dimensions attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor {
    height: u32,
    width: u32,
    depth: u32,
    data: Vec<u8>,
}

impl Tensor {
    /// Builds a tensor, checking that the buffer length matches the
    /// declared dimensions.
    pub fn new(height: u32, width: u32, depth: u32, data: Vec<u8>) -> Result<Self> {
        let expected = height as usize * width as usize * depth as usize;
        if data.len() != expected {
            return Err(ShardError::TensorSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            depth,
            data,
        })
    }

    /// (height, width, depth).
    pub fn dims(&self) -> (u32, u32, u32) {
        (self.height, self.width, self.depth)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// One serialized (image, grid) pair.
///
/// Records are self-describing: both tensors carry their dimensions, so a
/// shard can be read back without side-channel metadata. Field order is
/// part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub height: u32,
    pub width: u32,
    pub depth: u32,
    pub grid_height: u32,
    pub grid_width: u32,
    pub grid_depth: u32,
    pub grid_raw: Vec<u8>,
    pub image_raw: Vec<u8>,
}

impl Record {
    pub fn from_pair(image: &Tensor, grid: &Tensor) -> Self {
        let (height, width, depth) = image.dims();
        let (grid_height, grid_width, grid_depth) = grid.dims();
        Self {
            height,
            width,
            depth,
            grid_height,
            grid_width,
            grid_depth,
            grid_raw: grid.data().to_vec(),
            image_raw: image.data().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tensor_rejects_mismatched_buffer_length() {
        let err = Tensor::new(2, 2, 3, vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            ShardError::TensorSize { expected: 12, actual: 5 }
        ));
    }

    #[test]
    fn record_carries_both_tensor_shapes() {
        let image = Tensor::new(4, 3, 3, vec![7; 36]).unwrap();
        let grid = Tensor::new(16, 16, 1, vec![0; 256]).unwrap();

        let record = Record::from_pair(&image, &grid);
        assert_eq!((record.height, record.width, record.depth), (4, 3, 3));
        assert_eq!(
            (record.grid_height, record.grid_width, record.grid_depth),
            (16, 16, 1)
        );
        assert_eq!(record.image_raw, vec![7; 36]);
        assert_eq!(record.grid_raw.len(), 256);
    }
}
