//! Platform seams the gesture cores are written against.
//!
//! The browser implementations live in `infrastructure`; `ManualScheduler`
//! and `RecordingHaptics` drive the same cores deterministically in tests.

use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Owned handle to a scheduled callback.
///
/// Dropping a handle cancels the callback as well; `cancel` makes the exit
/// path explicit at call sites.
pub trait TimerHandle: 'static {
    fn cancel(self);
}

/// Clock, one-shot timers and a local task spawner.
pub trait Scheduler: 'static {
    type Timer: TimerHandle;

    /// Milliseconds on a monotonic-enough wall clock.
    fn now(&self) -> u64;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;

    /// Resolves after `delay_ms`. Dropping the future cancels the timer.
    fn sleep(&self, delay_ms: u32) -> LocalBoxFuture<'static, ()>;

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Best-effort vibration side channel. Must never fail or block.
pub trait Haptics {
    fn pulse(&self, duration_ms: u32);
}

/// Read-only view of a scroll container's vertical offset.
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;
}

/// A fixed or externally driven offset, e.g. a surface owned by a test.
impl ScrollSurface for std::cell::Cell<f64> {
    fn scroll_top(&self) -> f64 {
        self.get()
    }
}

impl<T: ScrollSurface + ?Sized> ScrollSurface for Rc<T> {
    fn scroll_top(&self) -> f64 {
        (**self).scroll_top()
    }
}

impl<T: Haptics + ?Sized> Haptics for Rc<T> {
    fn pulse(&self, duration_ms: u32) {
        (**self).pulse(duration_ms)
    }
}
