//! Shared constants for invoice merging
//!
//! These only seed defaults; composition reads its dimensions from
//! `SheetConfig` and `SheetGeometry`.

// =============================================================================
// Reference Sheet
// =============================================================================

/// A4 portrait width in points
pub const A4_WIDTH_PT: f32 = 595.27;

/// A4 portrait height in points
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Gap around and between grid cells (points)
pub const DEFAULT_MARGIN_PT: f32 = 10.0;

// =============================================================================
// Merge Defaults
// =============================================================================

/// Invoices per output sheet when none is requested
pub const DEFAULT_PAGES_PER_SHEET: usize = 4;

/// Output file name used by the command line tool
pub const DEFAULT_OUTPUT_FILE: &str = "merged_invoices.pdf";

// =============================================================================
// Source Parsing
// =============================================================================

/// Maximum number of `Parent` links followed when resolving inherited page attributes
pub const MAX_INHERITANCE_DEPTH: usize = 32;
