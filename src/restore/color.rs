//! Color model classification for decoded source images
//!
//! The scrambler produces monochrome pages by replicating a single channel
//! three times, so classification is an exact equality test on the channel
//! planes. A perceptual threshold would risk misreading near-gray color
//! pages as monochrome.

use crate::io::error::{RestoreError, Result};
use image::{DynamicImage, RgbImage};

/// Pixel layout of a source image and of the canvas rebuilt from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// Single intensity channel
    Monochrome,
    /// Three channels, red/green/blue
    Color,
}

/// Determine the color model of a decoded source image
///
/// Single-channel images are monochrome by construction. Three-channel
/// images are monochrome exactly when every pixel has identical red,
/// green, and blue values.
///
/// # Errors
///
/// Returns [`RestoreError::UnsupportedFormat`] for any channel layout
/// other than 8-bit single-channel or 8-bit RGB; this is a precondition
/// failure, not a silent fallback.
pub fn classify(source: &DynamicImage) -> Result<ColorModel> {
    match source {
        DynamicImage::ImageLuma8(_) => Ok(ColorModel::Monochrome),
        DynamicImage::ImageRgb8(rgb) => Ok(classify_rgb(rgb)),
        other => Err(RestoreError::UnsupportedFormat {
            color: other.color(),
        }),
    }
}

fn classify_rgb(source: &RgbImage) -> ColorModel {
    for pixel in source.pixels() {
        let [r, g, b] = pixel.0;
        if r != g || r != b {
            return ColorModel::Color;
        }
    }
    ColorModel::Monochrome
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb};

    #[test]
    fn test_luma_source_is_monochrome() {
        let source = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        assert_eq!(classify(&source).unwrap(), ColorModel::Monochrome);
    }

    #[test]
    fn test_identical_planes_are_monochrome() {
        let source = RgbImage::from_pixel(8, 8, Rgb([120, 120, 120]));
        assert_eq!(
            classify(&DynamicImage::ImageRgb8(source)).unwrap(),
            ColorModel::Monochrome
        );
    }

    #[test]
    fn test_single_differing_pixel_is_color() {
        let mut source = RgbImage::from_pixel(8, 8, Rgb([120, 120, 120]));
        source.put_pixel(7, 3, Rgb([120, 121, 120]));
        assert_eq!(
            classify(&DynamicImage::ImageRgb8(source)).unwrap(),
            ColorModel::Color
        );
    }

    #[test]
    fn test_blue_plane_difference_is_color() {
        let mut source = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        source.put_pixel(0, 0, Rgb([0, 0, 1]));
        assert_eq!(
            classify(&DynamicImage::ImageRgb8(source)).unwrap(),
            ColorModel::Color
        );
    }

    #[test]
    fn test_rgba_source_is_rejected() {
        let source = DynamicImage::new_rgba8(4, 4);
        let err = classify(&source).unwrap_err();
        assert!(matches!(err, RestoreError::UnsupportedFormat { .. }));
    }
}
