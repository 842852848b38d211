//! Glyph rasterization into a [`PixelSink`].

use ed047tc1::{PixelSink, Rect};
use log::debug;

use crate::{
    config::TextRenderConfig,
    font::{GlyphMetrics, is_space},
    script::is_script_glyph,
};

/// Clockwise quarter-turn applied to a glyph bitmap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Cw90,
    Deg180,
    Ccw270,
}

impl Rotation {
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Cw90,
            2 => Self::Deg180,
            _ => Self::Ccw270,
        }
    }

    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Cw90 | Self::Ccw270)
    }

    /// Size of a `w x h` bitmap after rotation.
    pub const fn rotated_size(self, w: i32, h: i32) -> (i32, i32) {
        if self.swaps_axes() { (h, w) } else { (w, h) }
    }

    /// Destination of source pixel `(col, row)` of a `w x h` bitmap, relative
    /// to the top-left corner of the rotated box.
    pub const fn transform(self, col: i32, row: i32, w: i32, h: i32) -> (i32, i32) {
        match self {
            Self::Deg0 => (col, row),
            Self::Cw90 => (h - 1 - row, col),
            Self::Deg180 => (w - 1 - col, h - 1 - row),
            Self::Ccw270 => (row, w - 1 - col),
        }
    }
}

/// Where and how a glyph bitmap lands on the surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Placement {
    rotation: Rotation,
    x: i32,
    y: i32,
}

fn is_upright_latin(code_point: u32, config: &TextRenderConfig<'_>) -> bool {
    config.is_vertical()
        && !is_space(code_point)
        && !is_script_glyph(code_point)
        && !config.rotate_non_script_glyphs_in_vertical_mode
}

/// Rotation of a glyph under `config`.
pub fn glyph_rotation(glyph: &GlyphMetrics, config: &TextRenderConfig<'_>) -> Rotation {
    if !config.is_vertical() {
        return Rotation::Deg0;
    }

    if is_script_glyph(glyph.code_point) {
        glyph.rotation_hint.unwrap_or_default()
    } else if config.rotate_non_script_glyphs_in_vertical_mode {
        config.vertical_rotation
    } else {
        Rotation::Deg0
    }
}

fn place(glyph: &GlyphMetrics, x: i32, y: i32, config: &TextRenderConfig<'_>) -> Placement {
    let rotation = glyph_rotation(glyph, config);

    if !config.is_vertical() {
        return Placement {
            rotation,
            x: x + glyph.x_offset as i32,
            y: y + glyph.y_offset as i32,
        };
    }

    let (w, _) = rotation.rotated_size(glyph.bitmap_width as i32, glyph.bitmap_height as i32);
    Placement {
        rotation,
        x: x + (config.column_width() - w) / 2,
        y,
    }
}

/// Primary-axis advance of a glyph, without character spacing.
///
/// Upright non-script glyphs in vertical text stack by their bitmap height;
/// everything else advances by `advance_width`.
pub fn glyph_advance(glyph: &GlyphMetrics, config: &TextRenderConfig<'_>) -> i32 {
    if is_upright_latin(glyph.code_point, config) {
        glyph.bitmap_height as i32
    } else {
        glyph.advance_width as i32
    }
}

/// Primary-axis advance of a code point, without character spacing. Missing
/// glyphs use the font's fallback advance.
pub fn char_advance(code_point: u32, config: &TextRenderConfig<'_>) -> i32 {
    match config.font.find(code_point) {
        Some(glyph) => glyph_advance(&glyph, config),
        None => config.font.fallback_advance(),
    }
}

/// Draws one code point with its top-left pen position at `(x, y)`.
///
/// Returns the pen advance including character spacing. Missing glyphs draw
/// nothing and return the fallback advance; spaces only advance.
pub fn draw_char<S>(
    sink: &mut S,
    x: i32,
    y: i32,
    code_point: u32,
    config: &TextRenderConfig<'_>,
) -> i32
where
    S: PixelSink + ?Sized,
{
    if !config.is_drawable() {
        return 0;
    }

    let Some(glyph) = config.font.find(code_point) else {
        debug!(
            "text: glyph U+{:04X} missing, advancing {}px",
            code_point,
            config.font.fallback_advance()
        );
        return config.font.fallback_advance() + config.character_spacing;
    };

    let advance = glyph_advance(&glyph, config);

    if !is_space(code_point) {
        let placement = place(&glyph, x, y, config);
        paint_glyph(sink, &glyph, placement, config, config.background_transparent);

        if config.bold {
            let (dx, dy) = if config.is_vertical() { (0, 1) } else { (1, 0) };
            let shifted = Placement {
                x: placement.x + dx,
                y: placement.y + dy,
                ..placement
            };
            paint_glyph(sink, &glyph, shifted, config, true);
        }
    }

    if config.underline && !config.is_vertical() && glyph.advance_width > 0 {
        let underline_y = y + config.line_height() + 1;
        sink.draw_hline(
            x,
            x + glyph.advance_width as i32 - 1,
            underline_y,
            config.text_color,
        );
    }

    advance + config.character_spacing
}

fn paint_glyph<S>(
    sink: &mut S,
    glyph: &GlyphMetrics,
    placement: Placement,
    config: &TextRenderConfig<'_>,
    transparent: bool,
) where
    S: PixelSink + ?Sized,
{
    if !glyph.has_bitmap() {
        return;
    }

    let Some(bitmap) = config.font.glyph_bitmap(glyph) else {
        debug!(
            "text: glyph U+{:04X} bitmap outside font blob, skipped",
            glyph.code_point
        );
        return;
    };

    let w = glyph.bitmap_width as i32;
    let h = glyph.bitmap_height as i32;
    let stride = (glyph.bitmap_width as usize).div_ceil(8);
    let rotation = placement.rotation;

    if !transparent {
        let (rw, rh) = rotation.rotated_size(w, h);
        sink.fill_rect(
            Rect::new(placement.x, placement.y, rw as u32, rh as u32),
            config.background_color,
        );
    }

    for row in 0..h {
        let row_bytes = &bitmap[row as usize * stride..(row as usize + 1) * stride];
        for col in 0..w {
            let byte = row_bytes[col as usize / 8];
            if byte & (0x80 >> (col % 8)) == 0 {
                continue;
            }

            let (dx, dy) = rotation.transform(col, row, w, h);
            sink.put_pixel(placement.x + dx, placement.y + dy, config.text_color);
        }
    }
}

#[cfg(test)]
mod tests;
