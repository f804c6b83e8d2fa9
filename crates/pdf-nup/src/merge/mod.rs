//! Invoice merging - placing many single-page invoices onto shared sheets
//!
//! This module orchestrates the merge:
//! 1. Compute the sheet geometry for the requested pages per sheet
//! 2. Read the first page of each source file, skipping unusable files
//! 3. Group pages into sheets and place them in reading order
//! 4. Render each sheet into the output PDF

mod discover;
mod io;

pub use discover::find_pdf_files;
pub use io::save_pdf;

use crate::compose::compose;
use crate::layout::compute_geometry;
use crate::options::MergeOptions;
use crate::render::OutputDocument;
use crate::source::SourcePages;
use crate::stats::calculate_statistics;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Merge the first page of each file in `paths` and write the result to `output`.
///
/// Composition runs on a single blocking task; the output file is only
/// created once every sheet has been composed.
pub async fn merge_invoices(
    paths: Vec<PathBuf>,
    options: &MergeOptions,
    output: impl AsRef<Path>,
) -> Result<MergeReport> {
    options.validate()?;

    let options = options.clone();
    let (document, report) =
        tokio::task::spawn_blocking(move || merge_files(&paths, &options)).await??;

    save_pdf(document, output.as_ref()).await?;
    log::info!("Merge complete, output file: {}", output.as_ref().display());

    Ok(report)
}

/// Compose the files in `paths`, in the given order, into a new document.
///
/// Files are read one at a time. Unreadable or empty files and extra pages
/// are reported in the returned [`MergeReport`], not as errors.
///
/// # Errors
/// [`MergeError::NoValidPages`] if no file contributed a page.
pub fn merge_files(paths: &[PathBuf], options: &MergeOptions) -> Result<(Document, MergeReport)> {
    options.validate()?;
    let geometry = compute_geometry(options.pages_per_sheet, &options.sheet)?;

    log::info!("Found {} PDF files", paths.len());
    log::info!(
        "Placing {} invoices per sheet ({} rows x {} cols, {} {}x{}pt)",
        geometry.pages_per_sheet,
        geometry.rows,
        geometry.cols,
        geometry.orientation,
        geometry.sheet_width,
        geometry.sheet_height
    );

    let mut pages = SourcePages::new(paths.iter().cloned());
    let mut output = OutputDocument::new();
    let mut source_pages = 0;

    for sheet in compose(&geometry, pages.by_ref()) {
        source_pages += sheet.pages.len();
        output.push_sheet(&sheet)?;
        log::info!(
            "Composed sheet {} with {} invoices",
            sheet.index + 1,
            sheet.pages.len()
        );
    }

    if source_pages == 0 {
        return Err(MergeError::NoValidPages);
    }

    let statistics = calculate_statistics(paths.len(), source_pages, &geometry);
    log::info!(
        "{} invoices on {} sheets",
        statistics.source_pages,
        statistics.output_sheets
    );

    let report = MergeReport {
        statistics,
        warnings: pages.into_warnings(),
    };
    Ok((output.finish(), report))
}
