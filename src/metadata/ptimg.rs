//! Deserialization of the per-page ptimg metadata document
//!
//! The document is a small JSON object; only `views[0]` is consulted.
//! Extra fields (`ptimg_version`, `transl`, ...) vary between reader
//! deployments and are ignored.

use crate::io::error::{Result, metadata_error};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PtImgDocument {
    views: Vec<PtImgView>,
}

#[derive(Debug, Deserialize)]
struct PtImgView {
    width: u32,
    height: u32,
    coords: Vec<String>,
}

/// Metadata for one reconstruction job
///
/// Tile order is semantically significant: later tiles overwrite earlier
/// ones where destination rectangles overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Target canvas width in pixels
    pub canvas_width: u32,
    /// Target canvas height in pixels
    pub canvas_height: u32,
    /// Ordered raw encoded coordinate strings, as they appear in the document
    pub tiles: Vec<String>,
}

impl ImageDescriptor {
    /// Parse a ptimg document from raw bytes
    ///
    /// `origin` (a path or URL) is carried into errors for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RestoreError::Metadata`] when the bytes are not
    /// valid JSON of the expected shape, the `views` array is empty, or
    /// the canvas dimensions are not positive.
    pub fn from_json(origin: &str, bytes: &[u8]) -> Result<Self> {
        let document: PtImgDocument =
            serde_json::from_slice(bytes).map_err(|err| metadata_error(&origin, &err))?;

        let view = document
            .views
            .into_iter()
            .next()
            .ok_or_else(|| metadata_error(&origin, &"views array is empty"))?;

        if view.width == 0 || view.height == 0 {
            return Err(metadata_error(
                &origin,
                &format!(
                    "canvas dimensions must be positive, got {}x{}",
                    view.width, view.height
                ),
            ));
        }

        Ok(Self {
            canvas_width: view.width,
            canvas_height: view.height,
            tiles: view.coords,
        })
    }
}
