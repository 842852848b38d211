#![cfg_attr(not(test), no_std)]

//! ED047TC1 (4.7" 960x540 16-level grayscale e-paper) framebuffer primitives.
//!
//! The panel waveform driver is an external collaborator: this crate only owns
//! the nibble-packed framebuffer, the drawing primitives that write into it,
//! the [`PanelSink`] boundary the driver implements, and screen transitions
//! that blend one framebuffer into another.

mod framebuffer;
mod geometry;
pub mod panel;
mod sink;
pub mod transition;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::{FrameBuffer, packed_len};
pub use geometry::Rect;
pub use panel::{PanelSink, UpdateMode};
pub use sink::PixelSink;
pub use transition::{Mask, StepOutcome, Transition, TransitionError, TransitionKind};

/// Number of gray levels a pixel can take (`0` = black, `15` = white).
pub const GRAY_LEVELS: u8 = 16;

/// Masks a value to its low four bits.
#[inline]
pub const fn gray(value: u8) -> u8 {
    value & 0x0F
}
