//! Touch input plumbing between a polling task and the render loop.
//!
//! The controller register protocol lives in the board crate; this module only
//! carries decoded points.

use core::{cell::RefCell, convert::Infallible};

use critical_section::Mutex;
use ed047tc1::Rect;
use heapless::Deque;
use log::{debug, warn};

/// Points handed to a router per [`TouchRouter::pump`] call at most.
pub const PUMP_LIMIT: usize = 32;

/// Decoded touch position in panel coordinates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub const fn is_inside(&self, rect: Rect) -> bool {
        rect.contains(self.x as i32, self.y as i32)
    }
}

/// Polled touch source.
pub trait TouchProvider {
    type Error;

    fn poll_point(&mut self) -> Result<Option<TouchPoint>, Self::Error>;
}

/// Scripted touch source used during bring-up and in tests.
#[derive(Debug, Default)]
pub struct MockTouch<const N: usize> {
    pending: Deque<TouchPoint, N>,
}

impl<const N: usize> MockTouch<N> {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Queues a point for a later poll. Returns `false` when full.
    pub fn press(&mut self, point: TouchPoint) -> bool {
        self.pending.push_back(point).is_ok()
    }
}

impl<const N: usize> TouchProvider for MockTouch<N> {
    type Error = Infallible;

    fn poll_point(&mut self) -> Result<Option<TouchPoint>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Bounded FIFO shared between an input task and the render task.
///
/// All access goes through a critical section, so a `static` queue can be
/// written from an interrupt-driven poller and read from the main loop.
pub struct TouchQueue<const N: usize> {
    points: Mutex<RefCell<Deque<TouchPoint, N>>>,
}

impl<const N: usize> TouchQueue<N> {
    pub const fn new() -> Self {
        Self {
            points: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Enqueues `point`. A full queue drops it and returns `false`.
    pub fn push(&self, point: TouchPoint) -> bool {
        let pushed = critical_section::with(|cs| {
            self.points.borrow_ref_mut(cs).push_back(point).is_ok()
        });

        if !pushed {
            warn!("touch: queue full, dropped ({}, {})", point.x, point.y);
        }
        pushed
    }

    pub fn pop(&self) -> Option<TouchPoint> {
        critical_section::with(|cs| self.points.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.points.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        critical_section::with(|cs| self.points.borrow_ref_mut(cs).clear());
    }
}

impl<const N: usize> Default for TouchQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers touch points to a handler owned by the caller's context.
pub struct TouchRouter<H> {
    handler: H,
    delivered: u32,
}

impl<H> TouchRouter<H>
where
    H: FnMut(TouchPoint),
{
    pub const fn new(handler: H) -> Self {
        Self {
            handler,
            delivered: 0,
        }
    }

    /// Points delivered since creation.
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    pub fn dispatch(&mut self, point: TouchPoint) {
        (self.handler)(point);
        self.delivered = self.delivered.wrapping_add(1);
    }

    /// Polls `provider` until it runs dry or [`PUMP_LIMIT`] points were
    /// delivered. Returns the number delivered.
    pub fn pump<P>(&mut self, provider: &mut P) -> Result<usize, P::Error>
    where
        P: TouchProvider,
    {
        let mut count = 0;
        while count < PUMP_LIMIT {
            let Some(point) = provider.poll_point()? else {
                break;
            };
            self.dispatch(point);
            count += 1;
        }

        if count > 0 {
            debug!("touch: pumped {} point(s)", count);
        }
        Ok(count)
    }

    /// Delivers everything currently in `queue`.
    pub fn drain<const N: usize>(&mut self, queue: &TouchQueue<N>) -> usize {
        let mut count = 0;
        while let Some(point) = queue.pop() {
            self.dispatch(point);
            count += 1;
        }
        count
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
