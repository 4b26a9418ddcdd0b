/// Default number of cells along each grid axis.
pub const GRID_SIZE: usize = 16;

/// Value of an occupied cell.
pub const CELL_SET: u8 = u8::MAX;

/// A square occupancy grid with a depth of one byte per cell.
///
/// Cells are addressed as (row, col) where row follows the image's y axis
/// and col its x axis. Stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPointGrid {
    size: usize,
    cells: Vec<u8>,
}

impl KeyPointGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// (height, width, depth) of the grid when treated as a tensor.
    pub fn dims(&self) -> (u32, u32, u32) {
        (self.size as u32, self.size as u32, 1)
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.size + col] = value;
    }

    /// Marks the cell containing a single image-space point.
    ///
    /// The coordinate is normalized against the image extent, scaled by the
    /// grid size, floored, and clamped to the edge bins. Offered for sparse
    /// per-point encodings; the silhouette rasterizer bins whole region
    /// fills instead.
    pub fn mark_point(&mut self, x: f64, y: f64, width: u32, height: u32) {
        let col = bin(x, width, self.size);
        let row = bin(y, height, self.size);
        self.set(row, col, CELL_SET);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

/// Maps a coordinate in [0, extent) to a bin index in [0, size).
pub(crate) fn bin(coord: f64, extent: u32, size: usize) -> usize {
    let normalized = coord / f64::from(extent);
    let raw = (normalized * size as f64).floor() as i64;
    raw.clamp(0, size as i64 - 1) as usize
}
