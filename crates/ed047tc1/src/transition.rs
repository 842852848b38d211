//! Stepped screen transitions between two framebuffers.
//!
//! Every pixel gets a 4-bit mask value. Step `n` of `steps` copies the pixels
//! of the next frame whose mask value is at most the step threshold, so low
//! mask values reveal first. The last step always copies the whole frame.

use log::{debug, warn};

use crate::{FrameBuffer, packed_len};

/// Step counts accepted by [`Transition::new`].
pub const VALID_STEP_COUNTS: [u8; 4] = [2, 4, 8, 16];

/// Built-in mask patterns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransitionKind {
    /// Uniform mask: the new frame appears on the final step.
    Fade,
    /// Reveals from the left edge.
    SlideLeft,
    /// Reveals from the right edge.
    SlideRight,
    /// Reveals from the top edge.
    SlideUp,
    /// Reveals from the bottom edge.
    SlideDown,
    /// Diagonal reveal from the top-left corner.
    Wipe,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransitionError {
    /// Step count is not one of [`VALID_STEP_COUNTS`].
    InvalidStepCount(u8),
    /// Custom mask has zero width or height.
    EmptyMask,
    /// Custom mask bytes do not cover `width * height` nibbles.
    MaskTooSmall { expected: usize, actual: usize },
    /// Current and next frames have different dimensions.
    SizeMismatch,
    /// No step left to run.
    Finished,
}

/// Caller-provided 4bpp mask image, packed like a [`FrameBuffer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mask<'m> {
    bytes: &'m [u8],
    width: usize,
    height: usize,
}

impl<'m> Mask<'m> {
    pub fn new(bytes: &'m [u8], width: usize, height: usize) -> Result<Self, TransitionError> {
        if width == 0 || height == 0 {
            return Err(TransitionError::EmptyMask);
        }

        let expected = packed_len(width, height);
        if bytes.len() < expected {
            return Err(TransitionError::MaskTooSmall {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// Mask value for a frame pixel, scaling nearest-neighbour when the mask
    /// size differs from the frame.
    fn sample(&self, x: usize, y: usize, frame_w: usize, frame_h: usize) -> u8 {
        let (mx, my) = if self.width == frame_w && self.height == frame_h {
            (x, y)
        } else {
            (x * self.width / frame_w, y * self.height / frame_h)
        };

        let index = my * self.width + mx;
        let byte = self.bytes[index / 2];
        if index % 2 == 0 { byte & 0x0F } else { byte >> 4 }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Pattern<'m> {
    Builtin(TransitionKind),
    Custom(Mask<'m>),
}

impl Pattern<'_> {
    fn value(&self, x: usize, y: usize, w: usize, h: usize) -> u8 {
        let (x64, y64, w64, h64) = (x as u64, y as u64, w as u64, h as u64);
        let value = match self {
            Pattern::Builtin(TransitionKind::Fade) => 15,
            Pattern::Builtin(TransitionKind::SlideLeft) => x64 * 16 / w64,
            Pattern::Builtin(TransitionKind::SlideRight) => (w64 - 1 - x64) * 16 / w64,
            Pattern::Builtin(TransitionKind::SlideUp) => y64 * 16 / h64,
            Pattern::Builtin(TransitionKind::SlideDown) => (h64 - 1 - y64) * 16 / h64,
            Pattern::Builtin(TransitionKind::Wipe) => {
                (x64 * 8 * h64 + y64 * 8 * w64) / (w64 * h64)
            }
            Pattern::Custom(mask) => return mask.sample(x, y, w, h),
        };

        value.min(15) as u8
    }
}

/// Result of one executed transition step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepOutcome {
    /// 1-based index of the step that just ran.
    pub step: u8,
    pub steps: u8,
    /// Highest mask value copied in this step.
    pub threshold: u8,
    pub finished: bool,
}

/// In-flight transition state. Framebuffers are borrowed per step, never
/// owned, so the caller keeps exclusive control of both frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition<'m> {
    pattern: Pattern<'m>,
    steps: u8,
    current_step: u8,
}

impl<'m> Transition<'m> {
    pub fn new(kind: TransitionKind, steps: u8) -> Result<Self, TransitionError> {
        Self::with_pattern(Pattern::Builtin(kind), steps)
    }

    pub fn with_mask(mask: Mask<'m>, steps: u8) -> Result<Self, TransitionError> {
        Self::with_pattern(Pattern::Custom(mask), steps)
    }

    fn with_pattern(pattern: Pattern<'m>, steps: u8) -> Result<Self, TransitionError> {
        if !VALID_STEP_COUNTS.contains(&steps) {
            warn!("transition: invalid step count {}", steps);
            return Err(TransitionError::InvalidStepCount(steps));
        }

        debug!("transition: prepared pattern={:?} steps={}", pattern, steps);
        Ok(Self {
            pattern,
            steps,
            current_step: 0,
        })
    }

    pub fn steps(&self) -> u8 {
        self.steps
    }

    /// Number of steps already executed.
    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn is_active(&self) -> bool {
        self.current_step < self.steps
    }

    /// Mask threshold used by the next step.
    pub fn next_threshold(&self) -> u8 {
        let step_value = 16 / self.steps;
        ((self.current_step + 1) * step_value).saturating_sub(1).min(15)
    }

    /// Mask value of one pixel for a frame of the given size.
    pub fn mask_value(&self, x: usize, y: usize, width: usize, height: usize) -> u8 {
        self.pattern.value(x, y, width, height)
    }

    /// Runs the next step, copying revealed pixels of `next` into `current`.
    pub fn step<B, N>(
        &mut self,
        current: &mut FrameBuffer<B>,
        next: &FrameBuffer<N>,
    ) -> Result<StepOutcome, TransitionError>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
        N: AsRef<[u8]>,
    {
        if !self.is_active() {
            return Err(TransitionError::Finished);
        }
        if current.width() != next.width() || current.height() != next.height() {
            return Err(TransitionError::SizeMismatch);
        }

        let threshold = self.next_threshold();
        let last = self.current_step + 1 == self.steps;

        if last {
            current.copy_from(next);
        } else {
            let (w, h) = (current.width(), current.height());
            for y in 0..h {
                for x in 0..w {
                    if self.pattern.value(x, y, w, h) > threshold {
                        continue;
                    }
                    if let Some(value) = next.pixel(x, y) {
                        current.set_pixel(x, y, value);
                    }
                }
            }
        }

        self.current_step += 1;
        debug!(
            "transition: step {}/{} threshold={} finished={}",
            self.current_step, self.steps, threshold, last
        );

        Ok(StepOutcome {
            step: self.current_step,
            steps: self.steps,
            threshold,
            finished: last,
        })
    }

    /// Skips the remaining steps and copies the whole next frame.
    pub fn complete<B, N>(
        &mut self,
        current: &mut FrameBuffer<B>,
        next: &FrameBuffer<N>,
    ) -> Result<StepOutcome, TransitionError>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
        N: AsRef<[u8]>,
    {
        if !self.is_active() {
            return Err(TransitionError::Finished);
        }
        if !current.copy_from(next) {
            return Err(TransitionError::SizeMismatch);
        }

        debug!(
            "transition: force-completed skipping {} steps",
            self.steps - self.current_step
        );
        self.current_step = self.steps;

        Ok(StepOutcome {
            step: self.steps,
            steps: self.steps,
            threshold: 15,
            finished: true,
        })
    }
}
