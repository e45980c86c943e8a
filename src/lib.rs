//! Descrambler for SpeedBinB-style web reader images
//!
//! Web readers built on SpeedBinB ship each page as a scrambled raster plus a
//! `.ptimg.json` document describing how rectangular tiles were rearranged.
//! This crate parses the tile map, classifies the source color model, and
//! reassembles the original page by pasting tiles into a fresh canvas.

#![forbid(unsafe_code)]

/// Retrieval of reader pages, metadata documents, and scrambled images
pub mod fetch;
/// Input/output operations, CLI, and error handling
pub mod io;
/// Parsing of the ptimg metadata document
pub mod metadata;
/// Core reconstruction: coordinate decoding, color classification, compositing
pub mod restore;

pub use io::error::{Result, RestoreError};
