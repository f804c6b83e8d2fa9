//! Merge single-page PDF invoices onto shared sheets in a grid.
//!
//! [`compute_geometry`] turns a pages-per-sheet count into a grid,
//! [`compose`] groups pages into sheets and places them, and
//! [`merge_invoices`] runs the whole pipeline from files to an output PDF.

mod compose;
mod constants;
pub mod layout;
pub mod merge;
mod options;
pub mod render;
mod source;
mod stats;
mod types;

pub use compose::{OutputSheet, PageBounds, PlacedPage, Sheets, compose};
pub use constants::{
    A4_HEIGHT_PT, A4_WIDTH_PT, DEFAULT_MARGIN_PT, DEFAULT_OUTPUT_FILE, DEFAULT_PAGES_PER_SHEET,
};
pub use layout::{Affine, GridPosition, Placement, Rect, SheetGeometry, compute_geometry};
pub use merge::{find_pdf_files, merge_files, merge_invoices, save_pdf};
pub use options::*;
pub use source::{SourcePage, SourcePages};
pub use stats::calculate_statistics;
pub use types::*;
