//! Panel-level constants and the refresh boundary for ED047TC1.

use crate::Rect;

/// Panel width in pixels.
pub const WIDTH: usize = 960;
/// Panel height in pixels.
pub const HEIGHT: usize = 540;
/// Bits per pixel.
pub const DEPTH_BITS: usize = 4;
/// Total framebuffer size in bytes (two pixels per byte).
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 2;

/// Darkest gray level.
pub const BLACK: u8 = 0x0;
/// Lightest gray level.
pub const WHITE: u8 = 0xF;

/// Waveform family used for a refresh.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UpdateMode {
    /// Full 16-level grayscale update with flashing.
    #[default]
    Gc16,
    /// 16-level grayscale update that only touches non-white pixels.
    Gl16,
    /// Fast monochrome direct update.
    Du,
}

/// Physical refresh sink implemented by the panel driver.
///
/// The driver reads the whole packed buffer but only needs to drive the rows
/// and columns covered by `region`.
pub trait PanelSink {
    type Error;

    fn update(&mut self, frame: &[u8], region: Rect, mode: UpdateMode) -> Result<(), Self::Error>;
}

/// Full-panel rectangle.
pub const fn full_region() -> Rect {
    Rect::new(0, 0, WIDTH as u32, HEIGHT as u32)
}
