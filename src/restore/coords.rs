//! Strict parser for encoded tile coordinate strings
//!
//! The reader encodes each tile placement as `i:<sx>,<sy>+<w>,<h>><dx>,<dy>`.
//! The `,` `+` `>` characters are plain delimiters, not operators; splitting
//! on all three must yield exactly six integer fields. Anything else is
//! rejected outright so a bad document can never produce a partial page.

use crate::io::configuration::{COORDINATE_DELIMITERS, COORDINATE_FIELDS, COORDINATE_PREFIX};
use crate::io::error::{RestoreError, Result};

/// One reconstruction instruction decoded from the metadata document
///
/// `size_x`/`size_y` are extents: the source crop spans
/// `[source_x, source_x + size_x)` by `[source_y, source_y + size_y)` and
/// lands at `(dest_x, dest_y)` on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Left edge of the tile within the scrambled source
    pub source_x: u32,
    /// Top edge of the tile within the scrambled source
    pub source_y: u32,
    /// Tile width in pixels, always positive
    pub size_x: u32,
    /// Tile height in pixels, always positive
    pub size_y: u32,
    /// Left edge of the destination rectangle on the canvas
    pub dest_x: u32,
    /// Top edge of the destination rectangle on the canvas
    pub dest_y: u32,
}

impl TileDescriptor {
    /// Decode one encoded coordinate string
    ///
    /// `index` is the tile's position in the metadata list and is carried
    /// into the error for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::MalformedCoordinate`] when the string does
    /// not split into six fields, lacks the fixed prefix, contains a
    /// non-integer field, or declares a zero-sized tile.
    pub fn parse(index: usize, raw: &str) -> Result<Self> {
        let tokens: Vec<&str> = raw.split(COORDINATE_DELIMITERS).collect();
        if tokens.len() != COORDINATE_FIELDS {
            return Err(malformed(
                index,
                raw,
                format!(
                    "expected {COORDINATE_FIELDS} fields, found {}",
                    tokens.len()
                ),
            ));
        }

        let first = tokens.first().copied().unwrap_or_default();
        let Some(stripped) = first.strip_prefix(COORDINATE_PREFIX) else {
            return Err(malformed(
                index,
                raw,
                format!("first field '{first}' lacks the '{COORDINATE_PREFIX}' prefix"),
            ));
        };

        let mut fields = [0_u32; COORDINATE_FIELDS];
        let field_tokens = std::iter::once(stripped).chain(tokens.iter().skip(1).copied());
        for (slot, token) in fields.iter_mut().zip(field_tokens) {
            *slot = token.trim().parse().map_err(|err: std::num::ParseIntError| {
                malformed(index, raw, format!("field '{token}': {err}"))
            })?;
        }

        let [source_x, source_y, size_x, size_y, dest_x, dest_y] = fields;
        if size_x == 0 || size_y == 0 {
            return Err(malformed(index, raw, "tile size must be positive".to_string()));
        }

        Ok(Self {
            source_x,
            source_y,
            size_x,
            size_y,
            dest_x,
            dest_y,
        })
    }
}

/// Decode an ordered coordinate list, preserving document order
///
/// # Errors
///
/// Returns the first [`RestoreError::MalformedCoordinate`] encountered;
/// the job is aborted rather than reconstructed from a partial tile set.
pub fn parse_tile_list(coords: &[String]) -> Result<Vec<TileDescriptor>> {
    coords
        .iter()
        .enumerate()
        .map(|(index, raw)| TileDescriptor::parse(index, raw))
        .collect()
}

fn malformed(index: usize, raw: &str, reason: String) -> RestoreError {
    RestoreError::MalformedCoordinate {
        index,
        raw: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_coordinate() {
        let tile = TileDescriptor::parse(0, "i:128,64+32,48>256,0").unwrap();
        assert_eq!(
            tile,
            TileDescriptor {
                source_x: 128,
                source_y: 64,
                size_x: 32,
                size_y: 48,
                dest_x: 256,
                dest_y: 0,
            }
        );
    }

    #[test]
    fn test_parse_rejects_five_fields() {
        let err = TileDescriptor::parse(2, "i:0,0+10,10>0").unwrap_err();
        match err {
            RestoreError::MalformedCoordinate { index, reason, .. } => {
                assert_eq!(index, 2);
                assert!(reason.contains("found 5"));
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_seven_fields() {
        assert!(TileDescriptor::parse(0, "i:0,0+10,10>0,0,0").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let err = TileDescriptor::parse(0, "0,0+10,10>0,0").unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn test_parse_rejects_non_integer_field() {
        assert!(TileDescriptor::parse(0, "i:0,abc+10,10>0,0").is_err());
    }

    #[test]
    fn test_parse_rejects_negative_field() {
        assert!(TileDescriptor::parse(0, "i:-4,0+10,10>0,0").is_err());
    }

    #[test]
    fn test_parse_rejects_zero_size() {
        assert!(TileDescriptor::parse(0, "i:0,0+0,10>0,0").is_err());
        assert!(TileDescriptor::parse(0, "i:0,0+10,0>0,0").is_err());
    }

    #[test]
    fn test_parse_tile_list_preserves_order() {
        let coords = vec![
            "i:0,0+8,8>8,8".to_string(),
            "i:8,8+8,8>0,0".to_string(),
        ];
        let tiles = parse_tile_list(&coords).unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles.first().map(|t| t.dest_x), Some(8));
        assert_eq!(tiles.last().map(|t| t.dest_x), Some(0));
    }

    #[test]
    fn test_parse_tile_list_aborts_on_first_bad_entry() {
        let coords = vec![
            "i:0,0+8,8>0,0".to_string(),
            "not a coordinate".to_string(),
            "i:8,0+8,8>8,0".to_string(),
        ];
        let err = parse_tile_list(&coords).unwrap_err();
        match err {
            RestoreError::MalformedCoordinate { index, .. } => assert_eq!(index, 1),
            other => unreachable!("unexpected error: {other}"),
        }
    }
}
