use ed047tc1::{PixelSink, Rect};

/// [`PixelSink`] adapter that drops every write outside `clip`.
pub struct ClipSink<'s, S: ?Sized> {
    inner: &'s mut S,
    clip: Rect,
}

impl<'s, S> ClipSink<'s, S>
where
    S: PixelSink + ?Sized,
{
    pub fn new(inner: &'s mut S, clip: Rect) -> Self {
        Self { inner, clip }
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }
}

impl<S> PixelSink for ClipSink<'_, S>
where
    S: PixelSink + ?Sized,
{
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> bool {
        let (Ok(sx), Ok(sy)) = (i32::try_from(x), i32::try_from(y)) else {
            return false;
        };
        if !self.clip.contains(sx, sy) {
            return false;
        }

        self.inner.set_pixel(x, y, value)
    }
}
