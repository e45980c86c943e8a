//! Core reconstruction pipeline
//!
//! This module contains the descrambling logic proper:
//! - Decoding encoded tile coordinates into placement instructions
//! - Classifying the source image's color model
//! - Compositing tiles onto a blank canvas in document order
//!
//! Everything here is a pure, synchronous transformation over in-memory
//! buffers; retrieval and persistence live in [`crate::fetch`] and
//! [`crate::io`].

/// Canvas allocation and ordered tile compositing
pub mod assembler;
/// Color model classification for decoded source images
pub mod color;
/// Strict parser for encoded tile coordinate strings
pub mod coords;

pub use assembler::{Canvas, descramble};
pub use color::ColorModel;
pub use coords::TileDescriptor;
