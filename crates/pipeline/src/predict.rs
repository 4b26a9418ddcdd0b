use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::RgbImage;
use imageproc::point::Point;
use keypoints::LANDMARK_COUNT;

use crate::{
    detect::{FaceBox, LandmarkPredictor},
    error::{PipelineError, Result},
};

/// Landmark predictor backed by a stored mean face shape.
///
/// The model file is a JSON array of 68 `[x, y]` pairs normalized to the
/// unit square; prediction scales them into each face box. This is the
/// simplest usable backend and the seam where a learned regressor plugs
/// in via [`LandmarkPredictor`].
#[derive(Debug, Clone)]
pub struct MeanShapePredictor {
    shape: Vec<[f32; 2]>,
}

impl MeanShapePredictor {
    /// Loads the mean shape from a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let shape: Vec<[f32; 2]> = serde_json::from_reader(BufReader::new(file))?;
        Self::from_shape(shape)
    }

    pub fn from_shape(shape: Vec<[f32; 2]>) -> Result<Self> {
        if shape.len() != LANDMARK_COUNT {
            return Err(PipelineError::Model(format!(
                "mean shape has {} points, expected {}",
                shape.len(),
                LANDMARK_COUNT
            )));
        }
        Ok(Self { shape })
    }
}

impl LandmarkPredictor for MeanShapePredictor {
    fn predict(&self, _image: &RgbImage, face: &FaceBox) -> Result<Vec<Point<i32>>> {
        let points = self
            .shape
            .iter()
            .map(|&[nx, ny]| {
                Point::new(
                    face.x + (nx * face.width as f32) as i32,
                    face.y + (ny * face.height as f32) as i32,
                )
            })
            .collect();
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_diagonal_shape() -> Vec<[f32; 2]> {
        (0..LANDMARK_COUNT)
            .map(|i| {
                let t = i as f32 / (LANDMARK_COUNT - 1) as f32;
                [t, t]
            })
            .collect()
    }

    #[test]
    fn rejects_models_with_wrong_point_count() {
        let err = MeanShapePredictor::from_shape(vec![[0.5, 0.5]; 10]).unwrap_err();
        assert!(matches!(err, PipelineError::Model(_)));
    }

    #[test]
    fn scales_the_shape_into_the_face_box() {
        let predictor = MeanShapePredictor::from_shape(unit_diagonal_shape()).unwrap();
        let image = RgbImage::new(200, 200);
        let face = FaceBox::new(10, 20, 100, 50);

        let points = predictor.predict(&image, &face).unwrap();
        assert_eq!(points.len(), LANDMARK_COUNT);
        assert_eq!(points[0], Point::new(10, 20));
        assert_eq!(points[LANDMARK_COUNT - 1], Point::new(110, 70));
    }
}
