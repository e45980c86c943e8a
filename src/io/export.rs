//! Lossless persistence of reconstructed canvases

use crate::io::error::{Result, RestoreError};
use crate::restore::Canvas;
use std::path::Path;

/// Save a reconstructed canvas as a PNG
///
/// Creates the parent directory if needed. The encoder is chosen from
/// the path extension; callers pass `.png` paths so output stays
/// lossless.
///
/// # Errors
///
/// Returns [`RestoreError::FileSystem`] when the parent directory cannot
/// be created and [`RestoreError::ImageExport`] when encoding or writing
/// fails.
pub fn save_canvas(canvas: Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| RestoreError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: err,
        })?;
    }

    canvas
        .into_dynamic()
        .save(path)
        .map_err(|err| RestoreError::ImageExport {
            path: path.to_path_buf(),
            source: err,
        })
}
