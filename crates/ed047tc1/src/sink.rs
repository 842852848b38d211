use crate::{Rect, packed_len};

/// Pixel-addressable 4bpp drawing surface.
///
/// Implementors only need bounds-checked [`set_pixel`](PixelSink::set_pixel);
/// every shape primitive is built on top of it and clips through it, so an
/// out-of-range coordinate never reaches an unrelated byte.
pub trait PixelSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Writes one gray level. Returns `false` when `(x, y)` is out of bounds.
    fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> bool;

    /// Signed-coordinate variant of [`set_pixel`](PixelSink::set_pixel).
    fn put_pixel(&mut self, x: i32, y: i32, value: u8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }

        self.set_pixel(x as usize, y as usize, value)
    }

    fn fill_rect(&mut self, rect: Rect, value: u8) {
        let Some(area) = rect.clamp_to(self.width(), self.height()) else {
            return;
        };

        for py in area.y..area.bottom() {
            for px in area.x..area.right() {
                self.put_pixel(px, py, value);
            }
        }
    }

    /// Copies a packed 4bpp image (same nibble order as a framebuffer) into
    /// `rect`, clipping whatever falls off the surface.
    ///
    /// Returns `false` and writes nothing when `image` holds fewer than
    /// `rect.width * rect.height` pixels.
    fn blit(&mut self, rect: Rect, image: &[u8]) -> bool {
        let (width, height) = (rect.width as usize, rect.height as usize);
        if image.len() < packed_len(width, height) {
            return false;
        }

        for row in 0..height {
            for col in 0..width {
                let index = row * width + col;
                let byte = image[index / 2];
                let value = if index % 2 == 0 { byte & 0x0F } else { byte >> 4 };
                self.put_pixel(rect.x + col as i32, rect.y + row as i32, value);
            }
        }
        true
    }

    fn draw_rect(&mut self, rect: Rect, value: u8) {
        if rect.is_empty() {
            return;
        }

        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        self.draw_hline(rect.x, right, rect.y, value);
        self.draw_hline(rect.x, right, bottom, value);
        self.draw_vline(rect.x, rect.y, bottom, value);
        self.draw_vline(right, rect.y, bottom, value);
    }

    /// Horizontal line from `x0` to `x1` inclusive.
    fn draw_hline(&mut self, x0: i32, x1: i32, y: i32, value: u8) {
        let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        for px in start..=end {
            self.put_pixel(px, y, value);
        }
    }

    /// Vertical line from `y0` to `y1` inclusive.
    fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, value: u8) {
        let (start, end) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for py in start..=end {
            self.put_pixel(x, py, value);
        }
    }

    /// Bresenham line, both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put_pixel(x, y, value);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle outline.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, value: u8) {
        if radius < 0 {
            return;
        }

        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                self.put_pixel(px, py, value);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, value: u8) {
        if radius < 0 {
            return;
        }

        let r2 = radius * radius;
        for dy in -radius..=radius {
            let mut half = 0;
            while (half + 1) * (half + 1) + dy * dy <= r2 {
                half += 1;
            }
            self.draw_hline(cx - half, cx + half, cy + dy, value);
        }
    }
}
