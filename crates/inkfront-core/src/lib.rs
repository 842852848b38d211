#![cfg_attr(not(test), no_std)]

//! Text layout and glyph rasterization for 4bpp e-paper framebuffers.
//!
//! Everything here borrows: text is a byte slice, fonts are static tables and
//! drawing goes through [`ed047tc1::PixelSink`]. Nothing allocates.

mod clip;
pub mod config;
pub mod font;
pub mod layout;
pub mod raster;
pub mod ruby;
pub mod script;
pub mod utf8;

#[cfg(test)]
mod testing;

pub use clip::ClipSink;
pub use config::{Alignment, TextRenderConfig, WritingDirection};
pub use ed047tc1::Rect as TextRect;
pub use font::{BreakFlags, FontError, FontTable, GlyphMetrics};
pub use layout::{
    LayoutSegment, LineBreaker, LineLayout, calc_height, calc_width, draw_multiline, draw_string,
    layout_lines, measure_string,
};
pub use raster::{Rotation, char_advance, draw_char};
pub use ruby::draw_ruby;
pub use script::{BreakClass, is_no_break_after, is_no_break_before, is_script_glyph};
pub use utf8::{ByteCursor, REPLACEMENT, next_code_point};
