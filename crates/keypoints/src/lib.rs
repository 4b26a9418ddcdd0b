//! # Facial key-point rasterization
//!
//! Converts 68-point facial landmark sets into fixed-size binary occupancy
//! grids. Each anatomical region (eyes, brows, nose, mouth, jaw) is drawn
//! onto an image-sized overlay canvas — filled convex hulls for the closed
//! regions, a polyline for the jaw — and the overlay is then binned into an
//! N×N×1 grid with two fixed calibration anchors.
//!
//! ```rust
//! use keypoints::LandmarkRasterizer;
//! use imageproc::point::Point;
//!
//! let landmarks: Vec<Point<i32>> = (0..68)
//!     .map(|i| Point::new(30 + i % 10, 30 + i % 7))
//!     .collect();
//!
//! let rasterizer = LandmarkRasterizer::default();
//! let grid = rasterizer.rasterize(128, 128, &landmarks)?;
//! assert_eq!(grid.dims(), (16, 16, 1));
//! # Ok::<(), keypoints::KeypointError>(())
//! ```

pub mod error;
pub mod grid;
pub mod rasterize;
pub mod regions;

pub use error::{KeypointError, Result};
pub use grid::{KeyPointGrid, CELL_SET, GRID_SIZE};
pub use rasterize::LandmarkRasterizer;
pub use regions::FacialRegion;

/// Number of points in a full facial landmark set.
pub const LANDMARK_COUNT: usize = 68;
