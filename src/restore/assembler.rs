//! Canvas allocation and ordered tile compositing
//!
//! Reconstruction allocates a white canvas sized per the metadata, then
//! pastes each tile in document order. Order matters: destination
//! rectangles may overlap and the last tile in the list must win, so
//! tiles are never reordered or applied in parallel.

use crate::io::configuration::{BLANK_LUMA, BLANK_RGB};
use crate::io::error::{RestoreError, Result};
use crate::metadata::ImageDescriptor;
use crate::restore::color::{self, ColorModel};
use crate::restore::coords::{self, TileDescriptor};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};

/// Reconstructed page in the pixel format chosen by classification
///
/// Owned exclusively by the assembler while tiles are applied, then
/// handed to the caller for persistence.
#[derive(Debug)]
pub enum Canvas {
    /// Single-channel canvas built from a monochrome source
    Monochrome(GrayImage),
    /// Three-channel canvas built from a color source
    Color(RgbImage),
}

impl Canvas {
    /// Canvas dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Monochrome(buffer) => buffer.dimensions(),
            Self::Color(buffer) => buffer.dimensions(),
        }
    }

    /// Color model the canvas was allocated with
    pub const fn model(&self) -> ColorModel {
        match self {
            Self::Monochrome(_) => ColorModel::Monochrome,
            Self::Color(_) => ColorModel::Color,
        }
    }

    /// Convert into a [`DynamicImage`] for encoding or inspection
    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Monochrome(buffer) => DynamicImage::ImageLuma8(buffer),
            Self::Color(buffer) => DynamicImage::ImageRgb8(buffer),
        }
    }
}

/// Rebuild the original page from a scrambled source and its metadata
///
/// Decodes every tile coordinate up front, classifies the source color
/// model, then composites tiles in document order onto a blank canvas.
/// The source is never modified.
///
/// # Errors
///
/// Returns [`RestoreError::MalformedCoordinate`] for an undecodable tile
/// entry, [`RestoreError::UnsupportedFormat`] for a source that is
/// neither 8-bit single-channel nor 8-bit RGB, and
/// [`RestoreError::BoundsViolation`] for a tile rectangle that escapes
/// the source or the canvas. All are fatal to the job; no partial canvas
/// is ever returned.
pub fn descramble(source: &DynamicImage, descriptor: &ImageDescriptor) -> Result<Canvas> {
    let tiles = coords::parse_tile_list(&descriptor.tiles)?;
    let model = color::classify(source)?;
    let (width, height) = (descriptor.canvas_width, descriptor.canvas_height);

    match (source, model) {
        (DynamicImage::ImageLuma8(plane), _) => {
            let mut canvas = GrayImage::from_pixel(width, height, Luma([BLANK_LUMA]));
            apply_tiles(plane, &mut canvas, &tiles)?;
            Ok(Canvas::Monochrome(canvas))
        }
        (DynamicImage::ImageRgb8(rgb), ColorModel::Monochrome) => {
            // All three planes are identical, so the red plane carries
            // the full image.
            let plane = red_plane(rgb);
            let mut canvas = GrayImage::from_pixel(width, height, Luma([BLANK_LUMA]));
            apply_tiles(&plane, &mut canvas, &tiles)?;
            Ok(Canvas::Monochrome(canvas))
        }
        (DynamicImage::ImageRgb8(rgb), ColorModel::Color) => {
            let mut canvas = RgbImage::from_pixel(width, height, Rgb(BLANK_RGB));
            apply_tiles(rgb, &mut canvas, &tiles)?;
            Ok(Canvas::Color(canvas))
        }
        // classify() already rejected every other layout
        (other, _) => Err(RestoreError::UnsupportedFormat {
            color: other.color(),
        }),
    }
}

fn red_plane(source: &RgbImage) -> GrayImage {
    GrayImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, _, _] = source.get_pixel(x, y).0;
        Luma([r])
    })
}

fn apply_tiles<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    canvas: &mut ImageBuffer<P, Vec<u8>>,
    tiles: &[TileDescriptor],
) -> Result<()>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    for (index, tile) in tiles.iter().enumerate() {
        check_bounds(
            index,
            "source",
            (tile.source_x, tile.source_y, tile.size_x, tile.size_y),
            source.dimensions(),
        )?;
        check_bounds(
            index,
            "canvas",
            (tile.dest_x, tile.dest_y, tile.size_x, tile.size_y),
            canvas.dimensions(),
        )?;

        for row in 0..tile.size_y {
            for col in 0..tile.size_x {
                let pixel = *source.get_pixel(tile.source_x + col, tile.source_y + row);
                canvas.put_pixel(tile.dest_x + col, tile.dest_y + row, pixel);
            }
        }
    }
    Ok(())
}

// Overflow-safe: offsets and extents near u32::MAX must not wrap into
// a passing comparison.
fn check_bounds(
    index: usize,
    buffer: &'static str,
    rect: (u32, u32, u32, u32),
    bounds: (u32, u32),
) -> Result<()> {
    let (x, y, width, height) = rect;
    let (bound_width, bound_height) = bounds;
    let fits_x = u64::from(x) + u64::from(width) <= u64::from(bound_width);
    let fits_y = u64::from(y) + u64::from(height) <= u64::from(bound_height);
    if fits_x && fits_y {
        Ok(())
    } else {
        Err(RestoreError::BoundsViolation {
            index,
            buffer,
            rect,
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds_accepts_exact_fit() {
        assert!(check_bounds(0, "source", (90, 90, 10, 10), (100, 100)).is_ok());
    }

    #[test]
    fn test_check_bounds_rejects_one_pixel_overhang() {
        let err = check_bounds(5, "canvas", (91, 0, 10, 10), (100, 100)).unwrap_err();
        match err {
            RestoreError::BoundsViolation { index, buffer, .. } => {
                assert_eq!(index, 5);
                assert_eq!(buffer, "canvas");
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_bounds_does_not_wrap_on_huge_offsets() {
        assert!(check_bounds(0, "source", (u32::MAX, 0, 2, 1), (100, 100)).is_err());
    }
}
