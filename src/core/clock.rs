//=========================================================================
// Frame Clock
//=========================================================================
//
// Wall-clock delta measurement and optional frame throttling.
//
// The clock is a thin state machine over an injectable time source:
//
//   restart()   reset the baseline (loop start)
//   tick()      delta since the previous tick, baseline advances
//   throttle()  sleep off the remainder of the frame budget
//
// Skipped frames simply do not call tick(), so elapsed time accumulates
// into the next delta instead of being lost.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

//=== TimeSource ==========================================================

/// Source of monotonic time and sleeping, injectable for tests.
///
/// Production code uses [`SystemTimeSource`]; tests substitute a manual
/// source to drive the clock deterministically.
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Blocks for the given duration.
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock time source backed by `std::time` and `std::thread`.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// Shared handles satisfy the trait too, so tests can keep a handle to a
// manual source after handing it to the clock.
impl<T: TimeSource + ?Sized> TimeSource for std::rc::Rc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Manually advanced time source for deterministic tests.
///
/// Time stands still until [`advance`](ManualTimeSource::advance) moves
/// it; `sleep` records the request and advances by the same amount, as a
/// real sleep would. Hand a clone of an `Rc<ManualTimeSource>` to the
/// clock and keep the other handle to drive it.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use std::time::Duration;
/// use proscenium::core::clock::{FrameClock, ManualTimeSource};
///
/// let source = Rc::new(ManualTimeSource::new());
/// let mut clock = FrameClock::new(Box::new(source.clone()));
///
/// source.advance(Duration::from_millis(16));
/// assert_eq!(clock.tick(), Duration::from_millis(16));
/// ```
pub struct ManualTimeSource {
    base: Instant,
    offset: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualTimeSource {
    /// Creates a source frozen at the current instant.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Moves the current time forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Returns every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

//=== FrameClock ==========================================================

/// Measures per-iteration delta time and throttles to a target rate.
pub struct FrameClock {
    source: Box<dyn TimeSource>,
    last_tick: Instant,
}

impl FrameClock {
    /// Creates a clock over the given time source.
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        let last_tick = source.now();
        Self { source, last_tick }
    }

    /// Resets the baseline without producing a delta.
    ///
    /// Called once when the loop starts so the first tick does not include
    /// setup time.
    pub fn restart(&mut self) {
        self.last_tick = self.source.now();
    }

    /// Advances the baseline and returns the elapsed time since the
    /// previous tick (or restart).
    pub fn tick(&mut self) -> Duration {
        let now = self.source.now();
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        delta
    }

    /// Sleeps off the remainder of the frame budget for `target_fps`.
    ///
    /// Budget is measured from the last tick. Does nothing when the rate is
    /// uncapped (`<= 0`) or the frame already overran its budget.
    pub fn throttle(&self, target_fps: f64) {
        if target_fps <= 0.0 {
            return;
        }

        let desired = Duration::from_secs_f64(1.0 / target_fps);
        let elapsed = self.source.now().saturating_duration_since(self.last_tick);
        if elapsed < desired {
            self.source.sleep(desired - elapsed);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
