//! Per-draw text configuration.

use ed047tc1::panel::{BLACK, WHITE};

use crate::{font::FontTable, raster::Rotation};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WritingDirection {
    /// Left to right, lines stacked top to bottom.
    #[default]
    Horizontal,
    /// Top to bottom, columns stacked right to left.
    Vertical,
}

/// Placement of a line inside the available extent. In vertical text
/// `Start` is the top of the column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Flat, copyable description of how one draw call renders text.
///
/// Nested draws (ruby) copy the config and override individual fields.
#[derive(Clone, Copy, Debug)]
pub struct TextRenderConfig<'a> {
    pub font: &'a FontTable<'a>,
    /// Gray level 0..=15 of set glyph pixels.
    pub text_color: u8,
    /// Gray level 0..=15 painted behind glyphs when not transparent.
    pub background_color: u8,
    pub background_transparent: bool,
    pub bold: bool,
    pub underline: bool,
    pub writing_direction: WritingDirection,
    pub character_spacing: i32,
    pub line_spacing: i32,
    pub alignment: Alignment,
    pub rotate_non_script_glyphs_in_vertical_mode: bool,
    /// Rotation applied to non-script glyphs in vertical text.
    pub vertical_rotation: Rotation,
    /// Maximum line extent in pixels, `0` disables wrapping.
    pub wrap_width: u32,
    pub inner_padding: u32,
    pub ruby_font: Option<&'a FontTable<'a>>,
    /// Gap between base text and ruby text.
    pub ruby_offset: i32,
}

impl<'a> TextRenderConfig<'a> {
    pub const fn new(font: &'a FontTable<'a>) -> Self {
        Self {
            font,
            text_color: BLACK,
            background_color: WHITE,
            background_transparent: true,
            bold: false,
            underline: false,
            writing_direction: WritingDirection::Horizontal,
            character_spacing: 0,
            line_spacing: 2,
            alignment: Alignment::Start,
            rotate_non_script_glyphs_in_vertical_mode: true,
            vertical_rotation: Rotation::Cw90,
            wrap_width: 0,
            inner_padding: 0,
            ruby_font: None,
            ruby_offset: 2,
        }
    }

    /// Copy of this config drawing with another font.
    pub const fn with_font(mut self, font: &'a FontTable<'a>) -> Self {
        self.font = font;
        self
    }

    /// Whether the font can lay out anything at all.
    pub const fn is_drawable(&self) -> bool {
        self.font.nominal_size != 0 && self.font.max_glyph_height != 0
    }

    pub const fn is_vertical(&self) -> bool {
        matches!(self.writing_direction, WritingDirection::Vertical)
    }

    pub const fn line_height(&self) -> i32 {
        self.font.max_glyph_height as i32
    }

    /// Width of one vertical column.
    pub const fn column_width(&self) -> i32 {
        let nominal = self.font.nominal_size as i32;
        let height = self.font.max_glyph_height as i32;
        if nominal > height { nominal } else { height }
    }

    /// Extent of one line (horizontal) or column (vertical) across the
    /// writing direction.
    pub const fn cross_extent(&self) -> i32 {
        if self.is_vertical() {
            self.column_width()
        } else {
            self.line_height()
        }
    }

    /// Distance between consecutive lines or columns.
    pub const fn line_pitch(&self) -> i32 {
        self.cross_extent() + self.line_spacing
    }
}
