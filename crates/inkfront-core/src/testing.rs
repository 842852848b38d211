//! Fixtures shared by the unit tests.

use ed047tc1::{FrameBuffer, PixelSink, packed_len, panel::WHITE};

use crate::font::{FontTable, GlyphMetrics, bitmap_size_bytes};

/// Owned font builder; [`TestFont::table`] borrows it as a [`FontTable`].
pub(crate) struct TestFont {
    nominal: u8,
    max_height: u8,
    glyphs: Vec<GlyphMetrics>,
    bitmap: Vec<u8>,
}

impl TestFont {
    pub(crate) fn new(nominal: u8, max_height: u8) -> Self {
        Self {
            nominal,
            max_height,
            glyphs: Vec::new(),
            bitmap: Vec::new(),
        }
    }

    /// Adds a glyph whose every bitmap bit is set.
    pub(crate) fn solid(self, ch: char, advance: u8, width: u8, height: u8) -> Self {
        let bits = vec![0xFF; bitmap_size_bytes(width, height)];
        self.glyph(GlyphMetrics::new(ch as u32, advance, 0, width, height), &bits)
    }

    /// Adds `glyph` with its bitmap, fixing up the blob offset.
    pub(crate) fn glyph(mut self, mut glyph: GlyphMetrics, bits: &[u8]) -> Self {
        assert_eq!(bits.len(), glyph.bitmap_len());
        glyph.bitmap_offset = self.bitmap.len() as u32;
        self.bitmap.extend_from_slice(bits);
        self.glyphs.push(glyph);
        self.glyphs.sort_by_key(|g| g.code_point);
        self
    }

    pub(crate) fn table(&self) -> FontTable<'_> {
        FontTable::new(self.nominal, self.max_height, &self.glyphs, &self.bitmap)
    }
}

/// Sink that records every write it accepts.
pub(crate) struct Recorder {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) writes: Vec<(usize, usize, u8)>,
}

impl Recorder {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            writes: Vec::new(),
        }
    }
}

impl PixelSink for Recorder {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.writes.push((x, y, value));
        true
    }
}

/// White `width x height` frame.
pub(crate) fn frame(width: usize, height: usize) -> FrameBuffer<Vec<u8>> {
    let mut frame = FrameBuffer::new(vec![0; packed_len(width, height)], width, height).unwrap();
    frame.clear(WHITE);
    frame
}

/// Coordinates holding `value`, row-major.
pub(crate) fn pixels_with(frame: &FrameBuffer<Vec<u8>>, value: u8) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            if frame.pixel(x, y) == Some(value) {
                out.push((x, y));
            }
        }
    }
    out
}

/// Black pixels of `frame`.
pub(crate) fn ink(frame: &FrameBuffer<Vec<u8>>) -> Vec<(usize, usize)> {
    pixels_with(frame, 0)
}
