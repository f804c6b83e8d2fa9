use crate::constants::{A4_HEIGHT_PT, A4_WIDTH_PT};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("{issue}: {}", .path.display())]
    InvalidDirectory {
        path: PathBuf,
        issue: DirectoryIssue,
    },
    #[error("No PDF files found in {}", .0.display())]
    NoPdfFilesFound(PathBuf),
    #[error("Cannot read {}: {reason}", .path.display())]
    UnreadablePage { path: PathBuf, reason: String },
    #[error("PDF file {} has no pages", .0.display())]
    EmptyDocument(PathBuf),
    #[error("No valid PDF pages to merge")]
    NoValidPages,
    #[error("Cannot write {}: {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot lay out {pages_per_sheet} pages per sheet")]
    UnsupportedLayout { pages_per_sheet: usize },
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Why an input directory was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryIssue {
    Missing,
    NotADirectory,
}

impl fmt::Display for DirectoryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryIssue::Missing => f.write_str("Directory does not exist"),
            DirectoryIssue::NotADirectory => f.write_str("Not a directory"),
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Output sheet sizes, in PDF points (1pt = 1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_pt: f32, height_pt: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (A4_HEIGHT_PT, 1190.55),
            PaperSize::A4 => (A4_WIDTH_PT, A4_HEIGHT_PT),
            PaperSize::A5 => (419.53, A4_WIDTH_PT),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// A per-file problem that was recovered from by skipping or truncating the source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceWarning {
    /// The document parsed but contains no pages
    Empty { path: PathBuf },
    /// Only the first of `page_count` pages was used
    MultiPage { path: PathBuf, page_count: usize },
    /// The file could not be read or parsed
    Unreadable { path: PathBuf, reason: String },
}

impl SourceWarning {
    /// Whether the source was dropped from the output entirely
    pub fn is_skip(&self) -> bool {
        !matches!(self, SourceWarning::MultiPage { .. })
    }
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceWarning::Empty { path } => {
                write!(f, "PDF file {} has no pages, skipping", path.display())
            }
            SourceWarning::MultiPage { path, page_count } => write!(
                f,
                "PDF file {} has {} pages, using only the first",
                path.display(),
                page_count
            ),
            SourceWarning::Unreadable { path, reason } => {
                write!(f, "Cannot process PDF file {}: {}", path.display(), reason)
            }
        }
    }
}

/// Statistics about a merge run
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatistics {
    /// Number of input files considered
    pub source_files: usize,
    /// Number of usable pages (one per readable, non-empty file)
    pub source_pages: usize,
    /// Input files that contributed nothing
    pub skipped_files: usize,
    /// Pages placed on each full sheet
    pub pages_per_sheet: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Grid cells left blank on the last sheet
    pub empty_cells: usize,
}

/// Outcome of a successful merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub statistics: MergeStatistics,
    pub warnings: Vec<SourceWarning>,
}
