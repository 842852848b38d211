//! Line breaking and multi-line text placement.
//!
//! [`LineBreaker`] turns a byte slice into [`LayoutSegment`]s: greedy
//! accumulation up to the wrap limit, then one glyph of kinsoku retreat when
//! the break would leave closing punctuation at a line start or an opening
//! bracket at a line end. Drawing and measuring share the same breaker, the
//! same advances and the same wrap limit when the box is wide enough, so
//! `calc_*` agrees with what `draw_multiline` paints.

use ed047tc1::{PixelSink, Rect};
use log::debug;

use crate::{
    clip::ClipSink,
    config::{Alignment, TextRenderConfig},
    font::SPACE,
    raster::{char_advance, draw_char},
    script::BreakClass,
    utf8::ByteCursor,
};

const LINE_FEED: u32 = 0x0A;
const CARRIAGE_RETURN: u32 = 0x0D;
const TAB: u32 = 0x09;
const TAB_SPACES: i32 = 4;

/// One laid-out line (or column), as byte offsets into the source text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LayoutSegment {
    pub start: usize,
    /// Exclusive; never includes the terminating line feed.
    pub end: usize,
    /// Primary-axis extent without trailing character spacing.
    pub extent: i32,
    pub glyphs: u16,
    /// Ended by a line feed rather than by wrapping.
    pub hard_break: bool,
}

impl LayoutSegment {
    pub fn text<'t>(&self, bytes: &'t [u8]) -> &'t [u8] {
        &bytes[self.start..self.end]
    }

    pub const fn is_empty(&self) -> bool {
        self.glyphs == 0
    }
}

/// Advance of one layout item, `None` for characters that take no room.
fn item_advance(code_point: u32, config: &TextRenderConfig<'_>) -> Option<i32> {
    match code_point {
        CARRIAGE_RETURN => None,
        TAB => Some(tab_advance(config)),
        _ => Some(char_advance(code_point, config)),
    }
}

fn tab_advance(config: &TextRenderConfig<'_>) -> i32 {
    TAB_SPACES * char_advance(SPACE, config) + (TAB_SPACES - 1) * config.character_spacing
}

#[derive(Clone, Copy, Debug)]
struct Placed {
    start: usize,
    extent_before: i32,
    class: BreakClass,
}

/// Streaming line breaker over borrowed UTF-8 bytes.
///
/// A `limit` of zero or less disables wrapping; line feeds still break.
#[derive(Clone, Debug)]
pub struct LineBreaker<'t, 'a> {
    text: &'t [u8],
    pos: usize,
    config: TextRenderConfig<'a>,
    limit: i32,
}

impl<'t, 'a> LineBreaker<'t, 'a> {
    pub fn new(text: &'t [u8], config: &TextRenderConfig<'a>, limit: i32) -> Self {
        Self {
            text,
            pos: 0,
            config: *config,
            limit,
        }
    }

    /// Byte offset the next segment starts at.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn class_of(&self, code_point: u32) -> BreakClass {
        BreakClass::of(code_point, self.config.font.find(code_point).as_ref())
    }

    fn emit(&mut self, start: usize, end: usize, extent: i32, glyphs: u16) -> LayoutSegment {
        self.pos = end;
        LayoutSegment {
            start,
            end,
            extent,
            glyphs,
            hard_break: false,
        }
    }
}

impl Iterator for LineBreaker<'_, '_> {
    type Item = LayoutSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let spacing = self.config.character_spacing;
        let mut pos = start;
        let mut extent = 0;
        let mut glyphs: u16 = 0;
        let mut last: Option<Placed> = None;

        loop {
            let mut cursor = ByteCursor::at(self.text, pos);
            let Some(code_point) = cursor.next_code_point() else {
                if glyphs == 0 {
                    self.pos = pos;
                    return None;
                }
                return Some(self.emit(start, pos, extent, glyphs));
            };
            let after = cursor.position();

            if code_point == LINE_FEED {
                let mut segment = self.emit(start, pos, extent, glyphs);
                segment.hard_break = true;
                self.pos = after;
                return Some(segment);
            }

            let Some(advance) = item_advance(code_point, &self.config) else {
                pos = after;
                continue;
            };
            let added = if glyphs == 0 { advance } else { spacing + advance };

            if self.limit > 0 && glyphs > 0 && extent + added > self.limit {
                let incoming = self.class_of(code_point);
                let blocked = incoming.no_break_before
                    || last.is_some_and(|placed| placed.class.no_break_after);

                if blocked {
                    if let Some(placed) = last.filter(|_| glyphs > 1) {
                        return Some(self.emit(
                            start,
                            placed.start,
                            placed.extent_before,
                            glyphs - 1,
                        ));
                    }
                    debug!(
                        "layout: forced break before U+{:04X} at byte {}",
                        code_point, pos
                    );
                }

                return Some(self.emit(start, pos, extent, glyphs));
            }

            last = Some(Placed {
                start: pos,
                extent_before: extent,
                class: self.class_of(code_point),
            });
            extent += added;
            glyphs = glyphs.saturating_add(1);
            pos = after;
        }
    }
}

/// Segments materialized into a fixed-capacity buffer.
#[derive(Clone, Debug, Default)]
pub struct LineLayout<const N: usize> {
    pub segments: heapless::Vec<LayoutSegment, N>,
    /// More segments existed than fit in `N`.
    pub truncated: bool,
}

impl<const N: usize> LineLayout<N> {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Longest segment extent, `0` when empty.
    pub fn max_extent(&self) -> i32 {
        self.segments.iter().map(|s| s.extent).max().unwrap_or(0)
    }
}

/// Lays out at most `N` segments of `text`.
pub fn layout_lines<const N: usize>(
    text: &[u8],
    config: &TextRenderConfig<'_>,
    limit: i32,
) -> LineLayout<N> {
    let mut layout = LineLayout::<N>::default();

    for segment in LineBreaker::new(text, config, limit) {
        if layout.segments.push(segment).is_err() {
            layout.truncated = true;
            break;
        }
    }

    if layout.truncated {
        debug!("layout: truncated at {} segments", N);
    }
    layout
}

/// Wrap limit for `available` pixels of primary extent. A `wrap_width` of `0`
/// disables wrapping, so only line feeds break; `0` is returned as unbounded.
fn wrap_limit(config: &TextRenderConfig<'_>, available: i32) -> i32 {
    match i32::try_from(config.wrap_width).unwrap_or(i32::MAX) {
        0 => 0,
        wrap if available > 0 => wrap.min(available),
        wrap => wrap,
    }
}

fn align_offset(alignment: Alignment, available: i32, extent: i32) -> i32 {
    let slack = (available - extent).max(0);
    match alignment {
        Alignment::Start => 0,
        Alignment::Center => slack / 2,
        Alignment::End => slack,
    }
}

/// Draws the items of `run` starting at the pen position `(x, y)`.
fn draw_run<S>(sink: &mut S, run: &[u8], x: i32, y: i32, config: &TextRenderConfig<'_>)
where
    S: PixelSink + ?Sized,
{
    let mut pen = 0;
    for code_point in ByteCursor::new(run) {
        let advance = match code_point {
            LINE_FEED | CARRIAGE_RETURN => continue,
            TAB => tab_advance(config) + config.character_spacing,
            _ if config.is_vertical() => draw_char(sink, x, y + pen, code_point, config),
            _ => draw_char(sink, x + pen, y, code_point, config),
        };
        pen += advance;
    }
}

/// Draws text inside `rect`. Returns the number of lines (columns in vertical
/// mode) emitted.
///
/// Lines wrap at `wrap_width`, capped at the padded box; with `wrap_width == 0`
/// they break only at line feeds and overflow is clipped. Lines that do not
/// fit completely across the box are dropped along with everything after
/// them. Every pixel write is clipped to `rect`.
pub fn draw_multiline<S, T>(
    sink: &mut S,
    rect: Rect,
    text: &T,
    config: &TextRenderConfig<'_>,
) -> i32
where
    S: PixelSink + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    let bytes = text.as_ref();
    let content = rect.inset(config.inner_padding);
    if !config.is_drawable() || bytes.is_empty() || content.is_empty() {
        return 0;
    }

    let vertical = config.is_vertical();
    let available = if vertical {
        content.height as i32
    } else {
        content.width as i32
    };
    let pitch = config.line_pitch();
    let cross = config.cross_extent();
    let mut clip = ClipSink::new(sink, rect);
    let mut lines = 0;

    for segment in LineBreaker::new(bytes, config, wrap_limit(config, available)) {
        let offset = lines * pitch;
        let shift = align_offset(config.alignment, available, segment.extent);

        let (x, y) = if vertical {
            let x = content.right() - cross - offset;
            if x < content.x {
                debug!("layout: column {} does not fit, stopping", lines);
                break;
            }
            (x, content.y + shift)
        } else {
            let y = content.y + offset;
            if y + cross > content.bottom() {
                debug!("layout: line {} does not fit, stopping", lines);
                break;
            }
            (content.x + shift, y)
        };

        draw_run(&mut clip, segment.text(bytes), x, y, config);
        lines += 1;
    }

    debug!(
        "layout: drew {} line(s) in {}x{} at ({}, {})",
        lines, rect.width, rect.height, rect.x, rect.y
    );
    lines
}

/// Extent of `text` drawn as a single line, ignoring line breaks.
pub fn measure_string<T>(text: &T, config: &TextRenderConfig<'_>) -> i32
where
    T: AsRef<[u8]> + ?Sized,
{
    if !config.is_drawable() {
        return 0;
    }

    let mut extent = 0;
    let mut items = 0;
    for code_point in ByteCursor::new(text.as_ref()) {
        if code_point == LINE_FEED {
            continue;
        }
        let Some(advance) = item_advance(code_point, config) else {
            continue;
        };
        if items > 0 {
            extent += config.character_spacing;
        }
        extent += advance;
        items += 1;
    }
    extent
}

/// Draws `text` on one line anchored at `(x, y)`.
///
/// The anchor is interpreted through `config.alignment` along the primary
/// axis: `Start` begins there, `Center` is centred on it, `End` ends on it.
/// Returns the drawn extent.
pub fn draw_string<S, T>(
    sink: &mut S,
    x: i32,
    y: i32,
    text: &T,
    config: &TextRenderConfig<'_>,
) -> i32
where
    S: PixelSink + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    let extent = measure_string(text, config);
    if extent == 0 {
        return 0;
    }

    let back = match config.alignment {
        Alignment::Start => 0,
        Alignment::Center => extent / 2,
        Alignment::End => extent,
    };
    let (x, y) = if config.is_vertical() {
        (x, y - back)
    } else {
        (x - back, y)
    };

    draw_run(sink, text.as_ref(), x, y, config);
    extent
}

/// Number of segments and the longest extent among them.
fn measure<T>(text: &T, config: &TextRenderConfig<'_>) -> (i32, i32)
where
    T: AsRef<[u8]> + ?Sized,
{
    if !config.is_drawable() {
        return (0, 0);
    }

    LineBreaker::new(text.as_ref(), config, wrap_limit(config, 0))
        .fold((0, 0), |(lines, longest), s| (lines + 1, longest.max(s.extent)))
}

fn stacked(lines: i32, cross: i32, spacing: i32) -> i32 {
    if lines == 0 {
        return 0;
    }
    lines * cross + (lines - 1) * spacing
}

/// Width of the block `draw_multiline` would paint, wrapping at `wrap_width`.
pub fn calc_width<T>(text: &T, config: &TextRenderConfig<'_>) -> i32
where
    T: AsRef<[u8]> + ?Sized,
{
    let (lines, longest) = measure(text, config);
    if config.is_vertical() {
        stacked(lines, config.column_width(), config.line_spacing)
    } else {
        longest
    }
}

/// Height of the block `draw_multiline` would paint, wrapping at `wrap_width`.
pub fn calc_height<T>(text: &T, config: &TextRenderConfig<'_>) -> i32
where
    T: AsRef<[u8]> + ?Sized,
{
    let (lines, longest) = measure(text, config);
    if config.is_vertical() {
        longest
    } else {
        stacked(lines, config.line_height(), config.line_spacing)
    }
}
