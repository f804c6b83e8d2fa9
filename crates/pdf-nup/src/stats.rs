use crate::layout::SheetGeometry;
use crate::types::*;

/// Calculate statistics for a merge of `source_pages` usable pages taken
/// from `source_files` input files
pub fn calculate_statistics(
    source_files: usize,
    source_pages: usize,
    geometry: &SheetGeometry,
) -> MergeStatistics {
    let pages_per_sheet = geometry.pages_per_sheet;
    let output_sheets = source_pages.div_ceil(pages_per_sheet);

    // Cells on the last sheet that stay blank
    let on_last_sheet = match source_pages % pages_per_sheet {
        0 if source_pages > 0 => pages_per_sheet,
        rem => rem,
    };
    let empty_cells = if output_sheets == 0 {
        0
    } else {
        geometry.cell_count() - on_last_sheet
    };

    MergeStatistics {
        source_files,
        source_pages,
        skipped_files: source_files.saturating_sub(source_pages),
        pages_per_sheet,
        output_sheets,
        empty_cells,
    }
}
