//! Grid layout calculation
//!
//! Maps a pages-per-sheet count to rows, columns, orientation and the
//! resulting cell dimensions on the configured sheet.

use crate::options::SheetConfig;
use crate::types::{MergeError, Orientation, Result};

use super::{GridPosition, Rect, SheetGeometry};

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute the sheet geometry for `pages_per_sheet` invoices.
///
/// 2, 4, 6 and 8 have fixed layouts; any other count gets
/// `cols = floor(sqrt(n))`, `rows = ceil(n / cols)` in portrait.
///
/// # Errors
/// `UnsupportedLayout` if the grid has no cells or fewer cells than
/// `pages_per_sheet`, `Config` if the margins leave no room for the cells.
pub fn compute_geometry(pages_per_sheet: usize, config: &SheetConfig) -> Result<SheetGeometry> {
    let (rows, cols, orientation) = grid_dimensions(pages_per_sheet);

    if rows * cols == 0 || rows * cols < pages_per_sheet {
        return Err(MergeError::UnsupportedLayout { pages_per_sheet });
    }

    let (sheet_width, sheet_height) = config.paper.dimensions_with_orientation(orientation);
    let margin = config.margin_pt;

    let cell_width = (sheet_width - margin * (cols + 1) as f32) / cols as f32;
    let cell_height = (sheet_height - margin * (rows + 1) as f32) / rows as f32;

    if !(cell_width > 0.0 && cell_height > 0.0) {
        return Err(MergeError::Config(format!(
            "A {}pt margin leaves no room for a {}x{} grid on a {}x{}pt sheet",
            margin, rows, cols, sheet_width, sheet_height
        )));
    }

    Ok(SheetGeometry {
        pages_per_sheet,
        rows,
        cols,
        orientation,
        sheet_width,
        sheet_height,
        cell_width,
        cell_height,
        margin,
    })
}

/// (rows, cols, orientation) for a pages-per-sheet count
fn grid_dimensions(pages_per_sheet: usize) -> (usize, usize, Orientation) {
    match pages_per_sheet {
        0 => (0, 0, Orientation::Portrait),
        2 => (2, 1, Orientation::Portrait),
        4 => (2, 2, Orientation::Landscape),
        6 => (3, 2, Orientation::Portrait),
        8 => (4, 2, Orientation::Portrait),
        n => {
            let cols = n.isqrt();
            (n.div_ceil(cols), cols, Orientation::Portrait)
        }
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Bounds of the cell at `pos`. Row 0 is the top row; y grows upward.
pub fn cell_bounds(geometry: &SheetGeometry, pos: GridPosition) -> Rect {
    let x = geometry.margin + pos.col as f32 * (geometry.cell_width + geometry.margin);
    let y = geometry.sheet_height
        - geometry.margin
        - (pos.row + 1) as f32 * geometry.cell_height
        - pos.row as f32 * geometry.margin;

    Rect::new(x, y, geometry.cell_width, geometry.cell_height)
}

// =============================================================================
// Tests
// =============================================================================
