//! Error types for reconstruction and retrieval operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all descrambling operations
#[derive(Debug)]
pub enum RestoreError {
    /// Source image channel layout is neither single-channel nor RGB
    UnsupportedFormat {
        /// Color type reported by the decoder
        color: image::ColorType,
    },

    /// A tile coordinate string does not decode into six integers
    MalformedCoordinate {
        /// Position of the tile in the metadata coordinate list
        index: usize,
        /// The raw encoded string as it appeared in the document
        raw: String,
        /// Description of the grammar violation
        reason: String,
    },

    /// A tile rectangle extends past its buffer
    ///
    /// Raised before any pixels are copied; reconstruction never clamps
    /// or skips an out-of-bounds tile.
    BoundsViolation {
        /// Position of the tile in the metadata coordinate list
        index: usize,
        /// Which buffer the rectangle escaped ("source" or "canvas")
        buffer: &'static str,
        /// Offending rectangle as (x, y, width, height)
        rect: (u32, u32, u32, u32),
        /// Buffer dimensions as (width, height)
        bounds: (u32, u32),
    },

    /// The ptimg metadata document is missing, unreadable, or malformed
    Metadata {
        /// Path or URL of the document
        origin: String,
        /// What went wrong with it
        reason: String,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save reconstructed image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// HTTP transport failure during retrieval
    Http {
        /// URL being fetched
        url: String,
        /// Underlying client error
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    HttpStatus {
        /// URL being fetched
        url: String,
        /// Status code returned
        status: u16,
    },

    /// CLI target failed validation
    InvalidTarget {
        /// The provided target value
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// One or more jobs in a batch failed
    ///
    /// Individual failures are reported as they occur; this summarizes
    /// them so the process exits nonzero.
    BatchFailed {
        /// Number of jobs that failed
        failed: usize,
        /// Total number of jobs attempted
        total: usize,
    },
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { color } => {
                write!(f, "Unsupported image format {color:?} (expected L8 or Rgb8)")
            }
            Self::MalformedCoordinate { index, raw, reason } => {
                write!(f, "Malformed tile coordinate #{index} '{raw}': {reason}")
            }
            Self::BoundsViolation {
                index,
                buffer,
                rect,
                bounds,
            } => {
                write!(
                    f,
                    "Tile #{index} escapes {buffer} bounds: rectangle {}x{} at ({}, {}) exceeds {}x{}",
                    rect.2, rect.3, rect.0, rect.1, bounds.0, bounds.1
                )
            }
            Self::Metadata { origin, reason } => {
                write!(f, "Bad metadata document '{origin}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Http { url, source } => {
                write!(f, "Request to '{url}' failed: {source}")
            }
            Self::HttpStatus { url, status } => {
                write!(f, "Request to '{url}' returned HTTP {status}")
            }
            Self::InvalidTarget { value, reason } => {
                write!(f, "Invalid target '{value}': {reason}")
            }
            Self::BatchFailed { failed, total } => {
                write!(f, "{failed} of {total} jobs failed")
            }
        }
    }
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for descrambling results
pub type Result<T> = std::result::Result<T, RestoreError>;

/// Create a metadata error with origin context
pub fn metadata_error(origin: &impl ToString, reason: &impl ToString) -> RestoreError {
    RestoreError::Metadata {
        origin: origin.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid target error
pub fn invalid_target(value: &impl ToString, reason: &impl ToString) -> RestoreError {
    RestoreError::InvalidTarget {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_violation_display_names_buffer() {
        let err = RestoreError::BoundsViolation {
            index: 3,
            buffer: "source",
            rect: (90, 0, 20, 10),
            bounds: (100, 100),
        };
        let message = err.to_string();
        assert!(message.contains("Tile #3"));
        assert!(message.contains("source"));
        assert!(message.contains("20x10"));
    }

    #[test]
    fn test_metadata_error_carries_origin() {
        let err = metadata_error(&"page_0001.ptimg.json", &"views array is empty");
        assert!(err.to_string().contains("page_0001.ptimg.json"));
        assert!(err.to_string().contains("views array is empty"));
    }
}
