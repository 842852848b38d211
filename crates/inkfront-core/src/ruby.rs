//! Ruby (furigana) annotations.

use ed047tc1::PixelSink;
use log::debug;

use crate::{
    config::{Alignment, TextRenderConfig},
    layout::{draw_string, measure_string},
};

/// Draws `base` at `(x, y)` with `ruby` set beside it in `config.ruby_font`.
///
/// Horizontal ruby sits above the base line, vertical ruby in a narrow column
/// to the right. The shorter run is centred against the longer one. Returns
/// the base extent, or `0` when no ruby font is configured.
pub fn draw_ruby<S, B, R>(
    sink: &mut S,
    x: i32,
    y: i32,
    base: &B,
    ruby: &R,
    config: &TextRenderConfig<'_>,
) -> i32
where
    S: PixelSink + ?Sized,
    B: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    let Some(ruby_font) = config.ruby_font else {
        debug!("ruby: no ruby font configured");
        return 0;
    };
    if !config.is_drawable() {
        return 0;
    }

    let base_config = TextRenderConfig {
        alignment: Alignment::Start,
        ..*config
    };
    let ruby_config = TextRenderConfig {
        underline: false,
        ruby_font: None,
        ..base_config.with_font(ruby_font)
    };

    let base_extent = measure_string(base, &base_config);
    let ruby_extent = measure_string(ruby, &ruby_config);
    let base_shift = ((ruby_extent - base_extent) / 2).max(0);
    let ruby_shift = ((base_extent - ruby_extent) / 2).max(0);

    if config.is_vertical() {
        draw_string(sink, x, y + base_shift, base, &base_config);
        let ruby_x = x + config.column_width() + config.ruby_offset;
        draw_string(sink, ruby_x, y + ruby_shift, ruby, &ruby_config);
    } else {
        draw_string(sink, x + base_shift, y, base, &base_config);
        let ruby_y = y - config.ruby_offset - ruby_font.max_glyph_height as i32;
        draw_string(sink, x + ruby_shift, ruby_y, ruby, &ruby_config);
    }

    base_extent
}
