//! Nibble-packed 4bpp framebuffer.

use crate::{PixelSink, gray};

/// Number of bytes needed to store `width * height` 4-bit pixels.
pub const fn packed_len(width: usize, height: usize) -> usize {
    (width * height).div_ceil(2)
}

/// 4bpp framebuffer over caller-provided storage.
///
/// Pixel mapping: pixel index `y * width + x`, two pixels per byte, the even
/// pixel in the low nibble and the odd pixel in the high nibble.
#[derive(Clone, Debug)]
pub struct FrameBuffer<B> {
    bytes: B,
    width: usize,
    height: usize,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]>,
{
    /// Wraps `bytes` as a `width x height` framebuffer.
    ///
    /// Returns `None` when the storage length does not match the dimensions.
    pub fn new(bytes: B, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || bytes.as_ref().len() != packed_len(width, height) {
            return None;
        }

        Some(Self {
            bytes,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.bytes
    }

    /// Reads a pixel's gray level.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = y * self.width + x;
        let byte = self.bytes.as_ref()[index / 2];

        if index % 2 == 0 {
            Some(byte & 0x0F)
        } else {
            Some(byte >> 4)
        }
    }
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.bytes.as_mut()
    }

    /// Fills every pixel with one gray level.
    pub fn clear(&mut self, value: u8) {
        let value = gray(value);
        self.bytes.as_mut().fill(value | (value << 4));
    }

    /// Sets a pixel to a gray level, preserving the neighbouring nibble.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        let index = y * self.width + x;
        let byte = &mut self.bytes.as_mut()[index / 2];

        if index % 2 == 0 {
            *byte = (*byte & 0xF0) | gray(value);
        } else {
            *byte = (*byte & 0x0F) | (gray(value) << 4);
        }

        true
    }

    /// Copies another framebuffer of identical dimensions.
    ///
    /// Returns `false` (and copies nothing) when the dimensions differ.
    pub fn copy_from<O>(&mut self, other: &FrameBuffer<O>) -> bool
    where
        O: AsRef<[u8]>,
    {
        if other.width != self.width || other.height != self.height {
            return false;
        }

        self.bytes.as_mut().copy_from_slice(other.bytes());
        true
    }
}

impl<B> PixelSink for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> bool {
        FrameBuffer::set_pixel(self, x, y, value)
    }
}
