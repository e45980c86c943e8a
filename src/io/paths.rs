//! Archive directory layout and filesystem-safe naming
//!
//! Downloads land under `raws_downloaded/<series>/<chapter>/` and
//! reconstructed pages under `unscrambled/<series>/<chapter>/`. Series
//! comes from the page title when the reader provides one, otherwise
//! from the URL path; all components are sanitized for Win32.

use crate::io::configuration::{METADATA_SUFFIX, OUTPUT_EXTENSION, RAWS_DIR, RESTORED_DIR};
use std::path::{Path, PathBuf};

/// Directories for one episode's raws and restored output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Destination for downloaded metadata/image pairs
    pub raws_dir: PathBuf,
    /// Destination for reconstructed PNG pages
    pub restored_dir: PathBuf,
}

/// Compute the archive layout for a reader URL
///
/// The chapter is the last non-empty URL path segment; the series is the
/// sanitized page title, falling back to the second-to-last segment.
pub fn archive_layout(output_root: &Path, reader_url: &str, title: Option<&str>) -> ArchiveLayout {
    let segments: Vec<String> = reader_url
        .split('/')
        .map(sanitize_component)
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut tail = segments.iter().rev();
    let chapter = tail
        .next()
        .cloned()
        .unwrap_or_else(|| String::from("chapter"));
    let series = title
        .map(sanitize_component)
        .filter(|name| !name.is_empty())
        .or_else(|| tail.next().cloned())
        .unwrap_or_else(|| String::from("series"));

    ArchiveLayout {
        raws_dir: output_root.join(RAWS_DIR).join(&series).join(&chapter),
        restored_dir: output_root.join(RESTORED_DIR).join(&series).join(&chapter),
    }
}

/// Strip characters Win32 refuses in path components
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Output filename for a reconstructed page: source stem plus `.png`
pub fn restored_name(image_path: &Path) -> PathBuf {
    let stem = image_path.file_stem().unwrap_or_default();
    PathBuf::from(format!(
        "{}.{OUTPUT_EXTENSION}",
        stem.to_string_lossy()
    ))
}

/// Sibling metadata document for a downloaded image
///
/// The reader names `<page>.ptimg.json` after `<page>.jpg`.
pub fn metadata_path_for(image_path: &Path) -> PathBuf {
    let stem = image_path.file_stem().unwrap_or_default();
    let name = format!("{}{METADATA_SUFFIX}", stem.to_string_lossy());

    image_path
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}
