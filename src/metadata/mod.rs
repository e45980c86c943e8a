//! Parsing of the ptimg metadata document that accompanies each page

/// Deserialization of the per-page ptimg metadata document
pub mod ptimg;

pub use ptimg::ImageDescriptor;
