use image::RgbImage;
use imageproc::point::Point;

use crate::error::Result;

/// Bounding box of a detected face, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBox {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to plug in a real detector (dlib, ONNX, ...).
pub trait FaceDetector: Send + Sync {
    /// Detect zero or more face bounding boxes in the image.
    fn detect(&self, image: &RgbImage) -> Result<Vec<FaceBox>>;
}

/// Pluggable 68-point landmark prediction backend.
pub trait LandmarkPredictor: Send + Sync {
    /// Predict the 68 landmark points for the face in `face`.
    fn predict(&self, image: &RgbImage, face: &FaceBox) -> Result<Vec<Point<i32>>>;
}

/// Detector that reports one box spanning the whole image.
///
/// The input corpus is face-cropped portraits, so the full frame is the
/// face region.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFrameDetector;

impl FaceDetector for FullFrameDetector {
    fn detect(&self, image: &RgbImage) -> Result<Vec<FaceBox>> {
        Ok(vec![FaceBox::new(0, 0, image.width(), image.height())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_frame_detector_covers_the_image() {
        let image = RgbImage::new(64, 48);
        let boxes = FullFrameDetector.detect(&image).unwrap();
        assert_eq!(boxes, vec![FaceBox::new(0, 0, 64, 48)]);
    }
}
