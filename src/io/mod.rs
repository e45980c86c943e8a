//! Input/output operations, CLI, and error handling

/// Command-line interface for downloading and restoring scrambled pages
pub mod cli;
/// Format constants and runtime configuration defaults
pub mod configuration;
/// Error types for reconstruction and retrieval operations
pub mod error;
/// Lossless persistence of reconstructed canvases
pub mod export;
/// Archive directory layout and filesystem-safe naming
pub mod paths;
/// Stage progress reporting for batch jobs
pub mod progress;
