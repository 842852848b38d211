/// Axis-aligned rectangle in framebuffer coordinates.
///
/// `x`/`y` may be negative (partially off-screen boxes); the covered area is
/// `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Overlapping area of both rectangles, `None` when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(left, top, (right - left) as u32, (bottom - top) as u32))
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }

        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(&self, amount: u32) -> Rect {
        let twice = amount.saturating_mul(2);
        Rect::new(
            self.x.saturating_add(amount as i32),
            self.y.saturating_add(amount as i32),
            self.width.saturating_sub(twice),
            self.height.saturating_sub(twice),
        )
    }

    /// Part of the rectangle that lies inside a `width x height` surface.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        self.intersection(&Rect::new(0, 0, width as u32, height as u32))
    }
}
