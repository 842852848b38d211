//! Pre-rasterized bitmap font tables.
//!
//! A font is a slice of [`GlyphMetrics`] sorted by code point plus one shared
//! bitmap blob. Glyph bitmaps are 1 bit per pixel, MSB first, each row padded
//! to a whole byte.

use crate::raster::Rotation;

pub const SPACE: u32 = 0x0020;
pub const IDEOGRAPHIC_SPACE: u32 = 0x3000;

/// Per-glyph line breaking overrides baked into a font table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct BreakFlags(u8);

impl BreakFlags {
    pub const EMPTY: Self = Self(0);
    /// Glyph must not start a line.
    pub const NO_BREAK_BEFORE: Self = Self(1 << 0);
    /// Glyph must not end a line.
    pub const NO_BREAK_AFTER: Self = Self(1 << 1);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Metadata of one glyph in a [`FontTable`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GlyphMetrics {
    /// Unicode scalar value, the table sort key.
    pub code_point: u32,
    /// Pen advance along the writing direction.
    pub advance_width: u8,
    /// Byte offset of the bitmap inside [`FontTable::bitmap`].
    pub bitmap_offset: u32,
    pub bitmap_width: u8,
    pub bitmap_height: u8,
    /// Preferred rotation for upright (script) glyphs in vertical text.
    pub rotation_hint: Option<Rotation>,
    pub x_offset: i8,
    pub y_offset: i8,
    pub break_flags: BreakFlags,
}

impl GlyphMetrics {
    pub const fn new(
        code_point: u32,
        advance_width: u8,
        bitmap_offset: u32,
        bitmap_width: u8,
        bitmap_height: u8,
    ) -> Self {
        Self {
            code_point,
            advance_width,
            bitmap_offset,
            bitmap_width,
            bitmap_height,
            rotation_hint: None,
            x_offset: 0,
            y_offset: 0,
            break_flags: BreakFlags::EMPTY,
        }
    }

    pub const fn with_offsets(mut self, x_offset: i8, y_offset: i8) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation_hint = Some(rotation);
        self
    }

    pub const fn with_break_flags(mut self, flags: BreakFlags) -> Self {
        self.break_flags = flags;
        self
    }

    /// Bytes used by this glyph's bitmap.
    pub const fn bitmap_len(&self) -> usize {
        bitmap_size_bytes(self.bitmap_width, self.bitmap_height)
    }

    pub const fn has_bitmap(&self) -> bool {
        self.bitmap_width != 0 && self.bitmap_height != 0
    }
}

/// Size in bytes of a `width x height` 1bpp bitmap with byte-padded rows.
pub const fn bitmap_size_bytes(width: u8, height: u8) -> usize {
    (width as usize).div_ceil(8) * height as usize
}

/// Whether `code_point` is one of the two space characters that never
/// rasterize.
pub const fn is_space(code_point: u32) -> bool {
    code_point == SPACE || code_point == IDEOGRAPHIC_SPACE
}

/// Synthesized metrics for the space characters: half the nominal size for
/// U+0020, the full nominal size for U+3000.
pub const fn space_glyph(code_point: u32, nominal_size: u8) -> Option<GlyphMetrics> {
    let advance = match code_point {
        SPACE => nominal_size / 2,
        IDEOGRAPHIC_SPACE => nominal_size,
        _ => return None,
    };

    Some(GlyphMetrics::new(code_point, advance, 0, 0, 0))
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FontError {
    /// Nominal size is zero, so fallback advances would be zero.
    ZeroNominalSize,
    /// `glyphs[index]` is not greater than its predecessor.
    Unsorted { index: usize },
    /// Two entries share a code point.
    DuplicateCodePoint { code_point: u32 },
    /// Bitmap extends past the end of the blob.
    BitmapOutOfRange { code_point: u32 },
}

/// Compiled, read-only font asset.
#[derive(Clone, Copy, Debug)]
pub struct FontTable<'a> {
    pub nominal_size: u8,
    pub max_glyph_height: u8,
    pub glyphs: &'a [GlyphMetrics],
    pub bitmap: &'a [u8],
}

impl<'a> FontTable<'a> {
    pub const fn new(
        nominal_size: u8,
        max_glyph_height: u8,
        glyphs: &'a [GlyphMetrics],
        bitmap: &'a [u8],
    ) -> Self {
        Self {
            nominal_size,
            max_glyph_height,
            glyphs,
            bitmap,
        }
    }

    pub fn glyph_count(&self) -> u16 {
        self.glyphs.len().min(u16::MAX as usize) as u16
    }

    /// Looks up a glyph by exact code point.
    ///
    /// Space characters missing from the table are synthesized.
    pub fn find(&self, code_point: u32) -> Option<GlyphMetrics> {
        match self
            .glyphs
            .binary_search_by_key(&code_point, |glyph| glyph.code_point)
        {
            Ok(index) => Some(self.glyphs[index]),
            Err(_) => space_glyph(code_point, self.nominal_size),
        }
    }

    /// Advance used for code points the font cannot draw.
    pub fn fallback_advance(&self) -> i32 {
        (self.nominal_size / 2) as i32
    }

    /// Bitmap bytes of `glyph`, `None` when the range is outside the blob.
    pub fn glyph_bitmap(&self, glyph: &GlyphMetrics) -> Option<&'a [u8]> {
        let start = glyph.bitmap_offset as usize;
        let end = start.checked_add(glyph.bitmap_len())?;
        self.bitmap.get(start..end)
    }

    /// Checks the table invariants: ascending unique code points and every
    /// bitmap inside the blob.
    pub fn validate(&self) -> Result<(), FontError> {
        if self.nominal_size == 0 {
            return Err(FontError::ZeroNominalSize);
        }

        for (index, pair) in self.glyphs.windows(2).enumerate() {
            if pair[1].code_point == pair[0].code_point {
                return Err(FontError::DuplicateCodePoint {
                    code_point: pair[1].code_point,
                });
            }
            if pair[1].code_point < pair[0].code_point {
                return Err(FontError::Unsorted { index: index + 1 });
            }
        }

        for glyph in self.glyphs {
            if self.glyph_bitmap(glyph).is_none() {
                return Err(FontError::BitmapOutOfRange {
                    code_point: glyph.code_point,
                });
            }
        }

        Ok(())
    }
}
