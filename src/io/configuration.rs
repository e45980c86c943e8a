//! Format constants and runtime configuration defaults

// Tile coordinate grammar
/// Fixed tag prefixing the first field of every encoded tile coordinate
pub const COORDINATE_PREFIX: &str = "i:";
/// Delimiters separating the three coordinate pairs, in grammar order
pub const COORDINATE_DELIMITERS: [char; 3] = [',', '+', '>'];
/// Number of integer fields in a well-formed coordinate string
pub const COORDINATE_FIELDS: usize = 6;

// Canvas defaults
/// Blank fill value for single-channel canvases
pub const BLANK_LUMA: u8 = 255;
/// Blank fill value for three-channel canvases
pub const BLANK_RGB: [u8; 3] = [255, 255, 255];

// Reader document conventions
/// Extension of the per-page metadata document
pub const METADATA_SUFFIX: &str = ".ptimg.json";
/// Extension of the scrambled page image
pub const IMAGE_SUFFIX: &str = ".jpg";
/// HTML attribute carrying the relative metadata link on reader pages
pub const PTIMG_ATTRIBUTE: &str = "data-ptimg=";
/// Substrings a reader URL must contain unless host checking is disabled
pub const EXPECTED_URL_TOKENS: [&str; 2] = ["7irocomics.jp", "webcomic"];

// Retrieval settings
/// Desktop browser User-Agent sent with every request; some readers
/// refuse the default client identity
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

// Output settings
/// Directory receiving downloaded raws, under the output root
pub const RAWS_DIR: &str = "raws_downloaded";
/// Directory receiving reconstructed pages, under the output root
pub const RESTORED_DIR: &str = "unscrambled";
/// Extension of reconstructed output images (always lossless)
pub const OUTPUT_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
