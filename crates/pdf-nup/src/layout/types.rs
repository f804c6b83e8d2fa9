//! Layout data types
//!
//! These types carry the geometry computed once per run and the per-page
//! placement that rendering consumes.

use crate::types::Orientation;

use super::Affine;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of the `index`-th cell in reading order (row-major)
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }
}

/// Grid geometry for one run.
///
/// Cells are separated from each other and from the sheet edges by `margin`,
/// so there are `cols + 1` vertical gaps and `rows + 1` horizontal gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    /// Pages placed on each sheet before starting a new one
    pub pages_per_sheet: usize,
    pub rows: usize,
    pub cols: usize,
    pub orientation: Orientation,
    /// Sheet width in points (orientation applied)
    pub sheet_width: f32,
    /// Sheet height in points (orientation applied)
    pub sheet_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub margin: f32,
}

impl SheetGeometry {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Where and how a single source page lands on its sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index of the cell in reading order
    pub slot: usize,
    pub grid_pos: GridPosition,
    /// Bounds of the whole cell on the sheet
    pub cell: Rect,
    /// Uniform scale factor applied to the source page
    pub scale: f32,
    /// Centering offset inside the cell
    pub offset_x: f32,
    pub offset_y: f32,
    /// Sheet position of the scaled page's bottom-left corner
    pub target_x: f32,
    pub target_y: f32,
    /// Source space to sheet space: scale, then translate
    pub transform: Affine,
}

impl Placement {
    /// Area covered by the scaled page on the sheet
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.target_x,
            self.target_y,
            self.cell.width - 2.0 * self.offset_x,
            self.cell.height - 2.0 * self.offset_y,
        )
    }
}
