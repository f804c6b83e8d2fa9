//! Layout calculation modules
//!
//! This module handles all the geometric calculations for merging:
//! - Grid geometry (rows, columns, orientation, cell dimensions)
//! - Content placement (uniform scaling and centering within a cell)
//! - Affine transforms mapping source pages onto the sheet

mod grid;
mod placement;
mod transform;
mod types;

pub use grid::*;
pub use placement::*;
pub use transform::*;
pub use types::*;
