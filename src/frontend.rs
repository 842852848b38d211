//! Render context tying one framebuffer to one panel.
//!
//! All drawing needs `&mut Frontend`, so one draw is in flight per framebuffer
//! at any time. Draw calls record the area they touched and [`Frontend::flush`]
//! pushes only that area to the panel.

use ed047tc1::{
    FrameBuffer, Mask, PanelSink, PixelSink, Rect, StepOutcome, Transition, TransitionError,
    TransitionKind, UpdateMode, panel::WHITE,
};
use inkfront_core::{Alignment, TextRenderConfig, draw_multiline, draw_ruby, measure_string};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrontendError<PanelErr> {
    Panel(PanelErr),
    Transition(TransitionError),
    /// A transition step was requested with no transition in flight.
    NoTransition,
}

pub type FrontendResult<T, PanelErr> = Result<T, FrontendError<PanelErr>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrontendConfig {
    /// Waveform used by [`Frontend::flush`] and final transition frames.
    pub update_mode: UpdateMode,
    pub clear_color: u8,
    /// One of 2, 4, 8 or 16.
    pub transition_steps: u8,
}

impl FrontendConfig {
    pub const fn new() -> Self {
        Self {
            update_mode: UpdateMode::Gc16,
            clear_color: WHITE,
            transition_steps: 4,
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Framebuffer plus panel with dirty-region tracking. `'m` is the lifetime
/// of a custom transition mask.
#[derive(Debug)]
pub struct Frontend<'m, B, P>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    frame: FrameBuffer<B>,
    panel: P,
    config: FrontendConfig,
    dirty: Option<Rect>,
    transition: Option<Transition<'m>>,
}

impl<'m, B, P> Frontend<'m, B, P>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    P: PanelSink,
{
    pub fn new(frame: FrameBuffer<B>, panel: P, config: FrontendConfig) -> Self {
        Self {
            frame,
            panel,
            config,
            dirty: None,
            transition: None,
        }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn frame(&self) -> &FrameBuffer<B> {
        &self.frame
    }

    /// Direct framebuffer access. Callers report what they touched with
    /// [`Frontend::mark_dirty`].
    pub fn frame_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn into_parts(self) -> (FrameBuffer<B>, P) {
        (self.frame, self.panel)
    }

    fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.frame.width() as u32, self.frame.height() as u32)
    }

    /// Area drawn since the last flush, clamped to the frame.
    pub fn dirty(&self) -> Option<Rect> {
        self.dirty
            .and_then(|rect| rect.clamp_to(self.frame.width(), self.frame.height()))
    }

    pub fn mark_dirty(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }

        self.dirty = Some(match self.dirty {
            Some(current) => current.union(&rect),
            None => rect,
        });
    }

    /// Fills the whole frame with `value`; `None` uses the configured clear
    /// color.
    pub fn clear(&mut self, value: Option<u8>) {
        self.frame.clear(value.unwrap_or(self.config.clear_color));
        self.mark_dirty(self.full_rect());
    }

    pub fn fill_rect(&mut self, rect: Rect, value: u8) {
        self.frame.fill_rect(rect, value);
        self.mark_dirty(rect);
    }

    /// Copies a packed 4bpp image into `rect`. Returns `false` when `image` is
    /// too short for `rect`; nothing is drawn or marked in that case.
    pub fn draw_image(&mut self, rect: Rect, image: &[u8]) -> bool {
        if !self.frame.blit(rect, image) {
            warn!(
                "frontend: image too short for {}x{} len={}",
                rect.width,
                rect.height,
                image.len()
            );
            return false;
        }

        self.mark_dirty(rect);
        true
    }

    /// Draws wrapped text into `rect`. Returns the number of lines drawn.
    pub fn draw_text<T>(&mut self, rect: Rect, text: &T, config: &TextRenderConfig<'_>) -> i32
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let lines = draw_multiline(&mut self.frame, rect, text, config);
        if lines > 0 {
            self.mark_dirty(rect);
        }
        lines
    }

    /// Draws one anchored line. Returns its extent.
    pub fn draw_string<T>(
        &mut self,
        x: i32,
        y: i32,
        text: &T,
        config: &TextRenderConfig<'_>,
    ) -> i32
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let extent = inkfront_core::draw_string(&mut self.frame, x, y, text, config);
        if extent > 0 {
            self.mark_dirty(run_box(x, y, extent, config));
        }
        extent
    }

    /// Draws `base` with a ruby annotation. Returns the base extent.
    pub fn draw_ruby<R, T>(
        &mut self,
        x: i32,
        y: i32,
        base: &R,
        ruby: &T,
        config: &TextRenderConfig<'_>,
    ) -> i32
    where
        R: AsRef<[u8]> + ?Sized,
        T: AsRef<[u8]> + ?Sized,
    {
        let extent = draw_ruby(&mut self.frame, x, y, base, ruby, config);
        let Some(ruby_font) = config.ruby_font.filter(|_| extent > 0) else {
            return extent;
        };

        let start = TextRenderConfig {
            alignment: Alignment::Start,
            ..*config
        };
        let ruby_config = start.with_font(ruby_font);
        let ruby_extent = measure_string(ruby, &ruby_config);
        let span = extent.max(ruby_extent);

        let area = if config.is_vertical() {
            let ruby_x = x + config.column_width() + config.ruby_offset;
            run_box(x, y, span, &start).union(&run_box(ruby_x, y, span, &ruby_config))
        } else {
            let ruby_y = y - config.ruby_offset - ruby_font.max_glyph_height as i32;
            run_box(x, y, span, &start).union(&run_box(x, ruby_y, span, &ruby_config))
        };
        self.mark_dirty(area);
        extent
    }

    /// Sends the dirty area to the panel. Returns `false` when nothing was
    /// dirty. The dirty area is kept when the panel fails.
    pub fn flush(&mut self) -> FrontendResult<bool, P::Error> {
        let Some(region) = self.dirty() else {
            self.dirty = None;
            return Ok(false);
        };

        self.panel
            .update(self.frame.bytes(), region, self.config.update_mode)
            .map_err(FrontendError::Panel)?;
        debug!(
            "frontend: flushed {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        );

        self.dirty = None;
        Ok(true)
    }

    /// Sends the whole frame regardless of the dirty area.
    pub fn flush_full(&mut self) -> FrontendResult<(), P::Error> {
        let region = self.full_rect();
        self.panel
            .update(self.frame.bytes(), region, self.config.update_mode)
            .map_err(FrontendError::Panel)?;

        self.dirty = None;
        Ok(())
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some_and(|t| t.is_active())
    }

    /// Starts a built-in transition with the configured step count.
    pub fn begin_transition(&mut self, kind: TransitionKind) -> FrontendResult<(), P::Error> {
        let transition = Transition::new(kind, self.config.transition_steps)
            .map_err(FrontendError::Transition)?;
        self.replace_transition(transition);
        Ok(())
    }

    /// Starts a transition driven by a custom mask.
    pub fn begin_masked_transition(&mut self, mask: Mask<'m>) -> FrontendResult<(), P::Error> {
        let transition = Transition::with_mask(mask, self.config.transition_steps)
            .map_err(FrontendError::Transition)?;
        self.replace_transition(transition);
        Ok(())
    }

    fn replace_transition(&mut self, transition: Transition<'m>) {
        if let Some(previous) = self.transition.filter(|t| t.is_active()) {
            debug!(
                "frontend: cancelled transition at step {}/{}",
                previous.current_step(),
                previous.steps()
            );
        }
        self.transition = Some(transition);
    }

    /// Blends one more step of `next` into the frame and refreshes the panel.
    ///
    /// Intermediate steps use the fast [`UpdateMode::Du`] waveform, the final
    /// step uses the configured one.
    pub fn step_transition<N>(
        &mut self,
        next: &FrameBuffer<N>,
    ) -> FrontendResult<StepOutcome, P::Error>
    where
        N: AsRef<[u8]>,
    {
        let transition = self.transition.as_mut().ok_or(FrontendError::NoTransition)?;
        let outcome = transition
            .step(&mut self.frame, next)
            .map_err(FrontendError::Transition)?;

        self.push_transition_frame(outcome)?;
        Ok(outcome)
    }

    /// Jumps straight to `next` and refreshes the panel.
    pub fn complete_transition<N>(
        &mut self,
        next: &FrameBuffer<N>,
    ) -> FrontendResult<StepOutcome, P::Error>
    where
        N: AsRef<[u8]>,
    {
        let transition = self.transition.as_mut().ok_or(FrontendError::NoTransition)?;
        let outcome = transition
            .complete(&mut self.frame, next)
            .map_err(FrontendError::Transition)?;

        self.push_transition_frame(outcome)?;
        Ok(outcome)
    }

    fn push_transition_frame(&mut self, outcome: StepOutcome) -> FrontendResult<(), P::Error> {
        if outcome.finished {
            self.transition = None;
        }

        let mode = if outcome.finished {
            self.config.update_mode
        } else {
            UpdateMode::Du
        };
        let region = self.full_rect();
        self.panel
            .update(self.frame.bytes(), region, mode)
            .map_err(FrontendError::Panel)?;

        self.dirty = None;
        Ok(())
    }
}

/// Bounding box of a single anchored run, including the underline row and
/// the bold re-strike column.
fn run_box(x: i32, y: i32, extent: i32, config: &TextRenderConfig<'_>) -> Rect {
    let back = match config.alignment {
        Alignment::Start => 0,
        Alignment::Center => extent / 2,
        Alignment::End => extent,
    };
    let length = (extent + 1).max(0) as u32;
    let cross = (config.cross_extent() + 2).max(0) as u32;

    if config.is_vertical() {
        Rect::new(x, y - back, cross, length)
    } else {
        Rect::new(x - back, y, length, cross)
    }
}
