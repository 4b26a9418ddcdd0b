use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::geometry::convex_hull;
use imageproc::point::Point;

use crate::{
    error::{KeypointError, Result},
    grid::{self, KeyPointGrid, CELL_SET, GRID_SIZE},
    regions::{is_region_color, FacialRegion},
    LANDMARK_COUNT,
};

/// Uniform sentinel the overlay canvas is cleared to.
pub(crate) const BACKGROUND: Rgb<u8> = Rgb([10, 10, 10]);

/// Fill color of the whole-face convex hull, drawn before the regions.
pub(crate) const FACE_FILL: Rgb<u8> = Rgb([245, 245, 245]);

/// Rasterizes a 68-point landmark set into a [`KeyPointGrid`].
///
/// Rendering happens on an image-sized overlay canvas: the whole-face
/// convex hull first, then each facial region in a fixed order (filled
/// hulls, except the jaw which is an open polyline). Grid cells are set
/// wherever a region fill lands, and the two corner anchors are forced
/// last so every consumer can rely on them.
#[derive(Debug, Clone)]
pub struct LandmarkRasterizer {
    grid_size: usize,
}

impl Default for LandmarkRasterizer {
    fn default() -> Self {
        Self { grid_size: GRID_SIZE }
    }
}

impl LandmarkRasterizer {
    /// Builds a rasterizer with `grid_size` cells along each axis.
    ///
    /// A zero grid has no cells to bin into or anchor, so it is rejected
    /// with [`KeypointError::InvalidGridSize`].
    pub fn new(grid_size: usize) -> Result<Self> {
        if grid_size == 0 {
            return Err(KeypointError::InvalidGridSize(grid_size));
        }
        Ok(Self { grid_size })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Renders the landmarks and bins the result into an occupancy grid.
    pub fn rasterize(
        &self,
        width: u32,
        height: u32,
        landmarks: &[Point<i32>],
    ) -> Result<KeyPointGrid> {
        let overlay = self.render_overlay(width, height, landmarks)?;
        Ok(self.grid_from_overlay(&overlay))
    }

    /// Draws the overlay canvas: face hull, then the seven regions.
    ///
    /// Exposed separately so callers can dump the canvas as a debugging
    /// image alongside the grids.
    pub fn render_overlay(
        &self,
        width: u32,
        height: u32,
        landmarks: &[Point<i32>],
    ) -> Result<RgbImage> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(KeypointError::invalid_count(landmarks.len()));
        }
        if width == 0 || height == 0 {
            return Err(KeypointError::EmptyImage { width, height });
        }

        let mut overlay = RgbImage::from_pixel(width, height, BACKGROUND);

        draw_filled_hull(&mut overlay, landmarks, FACE_FILL);

        for region in FacialRegion::DRAW_ORDER {
            let points = &landmarks[region.index_range()];
            if region.is_open_contour() {
                for (start, end) in contour_segments(points) {
                    draw_line_segment_mut(&mut overlay, start, end, region.color());
                }
            } else {
                draw_filled_hull(&mut overlay, points, region.color());
            }
        }

        Ok(overlay)
    }

    /// Bins region-colored overlay pixels into the grid and forces the
    /// corner anchors: (0,0) black, (N-1,N-1) white.
    pub fn grid_from_overlay(&self, overlay: &RgbImage) -> KeyPointGrid {
        let mut grid = KeyPointGrid::new(self.grid_size);
        let (width, height) = overlay.dimensions();

        for (x, y, pixel) in overlay.enumerate_pixels() {
            if is_region_color(*pixel) {
                let col = grid::bin(f64::from(x), width, self.grid_size);
                let row = grid::bin(f64::from(y), height, self.grid_size);
                grid.set(row, col, CELL_SET);
            }
        }

        grid.set(0, 0, 0);
        grid.set(self.grid_size - 1, self.grid_size - 1, CELL_SET);
        grid
    }
}

/// Consecutive-point segments of an open contour. A slice of `n` points
/// yields `n - 1` segments.
fn contour_segments(points: &[Point<i32>]) -> Vec<((f32, f32), (f32, f32))> {
    points
        .windows(2)
        .map(|pair| {
            (
                (pair[0].x as f32, pair[0].y as f32),
                (pair[1].x as f32, pair[1].y as f32),
            )
        })
        .collect()
}

/// Fills the convex hull of `points` onto the canvas. Degenerate hulls
/// (fewer than three vertices) fall back to a line or a single pixel.
fn draw_filled_hull(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    let hull = convex_hull(points);
    match hull.len() {
        0 => {}
        1 => {
            let p = hull[0];
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < canvas.width() && (p.y as u32) < canvas.height()
            {
                canvas.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        2 => draw_line_segment_mut(
            canvas,
            (hull[0].x as f32, hull[0].y as f32),
            (hull[1].x as f32, hull[1].y as f32),
            color,
        ),
        _ => draw_polygon_mut(canvas, &hull, color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A compact synthetic face: every region's points sit inside a known
    /// bounding box so grid assertions can be made against its bins.
    fn synthetic_landmarks() -> Vec<Point<i32>> {
        let mut points = Vec::with_capacity(LANDMARK_COUNT);
        for i in 0..LANDMARK_COUNT {
            // Scatter points over [40, 80) x [40, 80) deterministically,
            // avoiding collinear degenerate regions.
            let x = 40 + ((i * 7) % 40) as i32;
            let y = 40 + ((i * 13) % 40) as i32;
            points.push(Point::new(x, y));
        }
        points
    }

    #[test]
    fn rejects_zero_grid_size() {
        let err = LandmarkRasterizer::new(0).unwrap_err();
        assert!(matches!(err, KeypointError::InvalidGridSize(0)));

        let rasterizer = LandmarkRasterizer::new(1).unwrap();
        let grid = rasterizer
            .rasterize(128, 128, &synthetic_landmarks())
            .unwrap();
        // A one-cell grid is the smallest legal one; the white anchor wins.
        assert_eq!(grid.dims(), (1, 1, 1));
        assert_eq!(grid.get(0, 0), CELL_SET);
    }

    #[test]
    fn rejects_wrong_landmark_count() {
        let rasterizer = LandmarkRasterizer::default();
        let short = vec![Point::new(1, 1); 10];
        let err = rasterizer.rasterize(128, 128, &short).unwrap_err();
        assert!(matches!(
            err,
            KeypointError::InvalidLandmarkCount { expected: 68, found: 10 }
        ));
    }

    #[test]
    fn rejects_empty_images() {
        let rasterizer = LandmarkRasterizer::default();
        let landmarks = synthetic_landmarks();
        let err = rasterizer.rasterize(0, 128, &landmarks).unwrap_err();
        assert!(matches!(err, KeypointError::EmptyImage { .. }));
    }

    #[test]
    fn grid_has_fixed_shape_and_anchors() {
        let rasterizer = LandmarkRasterizer::default();
        let grid = rasterizer
            .rasterize(160, 160, &synthetic_landmarks())
            .unwrap();

        assert_eq!(grid.dims(), (16, 16, 1));
        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(grid.get(15, 15), CELL_SET);
    }

    #[test]
    fn occupancy_stays_within_the_landmark_bounding_bins() {
        let rasterizer = LandmarkRasterizer::default();
        let landmarks = synthetic_landmarks();
        let grid = rasterizer.rasterize(160, 160, &landmarks).unwrap();

        // Landmarks live in [40, 80): bins 4..=7 on a 16-cell grid over 160px.
        let mut region_cells = 0;
        for row in 0..16 {
            for col in 0..16 {
                if (row, col) == (15, 15) || grid.get(row, col) == 0 {
                    continue;
                }
                region_cells += 1;
                assert!((4..=7).contains(&row), "row {row} out of range");
                assert!((4..=7).contains(&col), "col {col} out of range");
            }
        }
        assert!(region_cells > 0, "expected at least one occupied cell");
    }

    #[test]
    fn face_hull_alone_never_reaches_the_grid() {
        let rasterizer = LandmarkRasterizer::default();
        let mut overlay = RgbImage::from_pixel(160, 160, BACKGROUND);
        // Paint a block with the whole-face fill color only.
        for y in 40..80 {
            for x in 40..80 {
                overlay.put_pixel(x, y, FACE_FILL);
            }
        }
        let grid = rasterizer.grid_from_overlay(&overlay);
        // Only the forced white anchor remains.
        assert_eq!(grid.occupied(), 1);
        assert_eq!(grid.get(15, 15), CELL_SET);
    }

    #[test]
    fn jaw_slice_yields_one_fewer_segment_than_points() {
        let landmarks = synthetic_landmarks();
        let jaw = &landmarks[FacialRegion::Jaw.index_range()];
        assert_eq!(jaw.len(), 17);

        let segments = contour_segments(jaw);
        assert_eq!(segments.len(), jaw.len() - 1);

        // Segments chain end to end.
        for pair in segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn overlay_is_image_sized_and_sentinel_filled() {
        let rasterizer = LandmarkRasterizer::default();
        let overlay = rasterizer
            .render_overlay(200, 100, &synthetic_landmarks())
            .unwrap();
        assert_eq!(overlay.dimensions(), (200, 100));
        // Far corner is untouched by any fill.
        assert_eq!(*overlay.get_pixel(199, 99), BACKGROUND);
    }
}
