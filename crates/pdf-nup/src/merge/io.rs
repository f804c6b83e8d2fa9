//! Document output

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Save the merged document.
///
/// Serialization happens off the async runtime; a failure to write the file
/// is reported as [`MergeError::OutputWriteFailure`].
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, MergeError>(writer)
    })
    .await??;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| MergeError::OutputWriteFailure { path, source })?;
    Ok(())
}
