//! Locating invoice files

use crate::types::*;
use std::path::{Path, PathBuf};

/// Find the PDF files directly inside `directory`.
///
/// Matches regular files whose extension is exactly `pdf` or `PDF`, sorted by
/// path (descending when `reverse` is set). Subdirectories are not searched.
pub async fn find_pdf_files(directory: impl AsRef<Path>, reverse: bool) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();

    let metadata = match tokio::fs::metadata(directory).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MergeError::InvalidDirectory {
                path: directory.to_owned(),
                issue: DirectoryIssue::Missing,
            });
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Err(MergeError::InvalidDirectory {
            path: directory.to_owned(),
            issue: DirectoryIssue::NotADirectory,
        });
    }

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(directory).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !has_pdf_extension(&path) {
            continue;
        }
        // Follows symlinks; broken links are left out
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(MergeError::NoPdfFilesFound(directory.to_owned()));
    }

    sort_paths(&mut files, reverse);
    Ok(files)
}

fn has_pdf_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("pdf" | "PDF")
    )
}

fn sort_paths(paths: &mut [PathBuf], reverse: bool) {
    paths.sort();
    if reverse {
        paths.reverse();
    }
}
