use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;

use crate::domain::gesture::{Scheduler, TimerHandle};
use crate::domain::logging::LogComponent;
use crate::log_error;

/// Browser event loop: `setTimeout` via gloo, tasks via `spawn_local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl BrowserScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl TimerHandle for Timeout {
    fn cancel(self) {
        drop(Timeout::cancel(self));
    }
}

impl Scheduler for BrowserScheduler {
    type Timer = Timeout;

    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn sleep(&self, delay_ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(delay_ms).boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

struct PendingTimer {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

struct VirtualClock {
    now: u64,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

struct ManualInner {
    clock: RefCell<VirtualClock>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

/// Deterministic scheduler with a virtual clock.
///
/// Nothing happens until the owner calls [`ManualScheduler::advance`] or
/// [`ManualScheduler::run_until_stalled`]; timers fire in due order and
/// spawned tasks are polled between timers.
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: u64) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualInner {
                clock: RefCell::new(VirtualClock { now, next_id: 0, timers: Vec::new() }),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.clock.borrow().timers.len()
    }

    /// Poll spawned tasks until none can make progress without the clock moving.
    pub fn run_until_stalled(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock forward by `ms`, firing every timer that falls due.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            self.run_until_stalled();
            let next = {
                let mut clock = self.inner.clock.borrow_mut();
                let due_index = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index);
                due_index.map(|index| {
                    let timer = clock.timers.remove(index);
                    clock.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.inner.clock.borrow_mut().now = target;
        self.run_until_stalled();
    }
}

/// Handle into a [`ManualScheduler`]; dropping it unschedules the callback.
pub struct ManualTimer {
    id: u64,
    scheduler: Weak<ManualInner>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        let Some(inner) = self.scheduler.upgrade() else {
            return;
        };
        let removed: Vec<PendingTimer> = {
            let mut clock = inner.clock.borrow_mut();
            let (removed, kept) =
                std::mem::take(&mut clock.timers).into_iter().partition(|timer| timer.id == self.id);
            clock.timers = kept;
            removed
        };
        drop(removed);
    }
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        drop(self);
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn now(&self) -> u64 {
        self.inner.clock.borrow().now
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut clock = self.inner.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + u64::from(delay_ms);
        clock.timers.push(PendingTimer { id, due, callback });
        ManualTimer { id, scheduler: Rc::downgrade(&self.inner) }
    }

    fn sleep(&self, delay_ms: u32) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel::<()>();
        let timer = self.set_timeout(
            delay_ms,
            Box::new(move || {
                let _ = tx.send(());
            }),
        );
        async move {
            let _timer = timer;
            let _ = rx.await;
        }
        .boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.inner.spawner.spawn_local(task) {
            log_error!(LogComponent::Infrastructure("ManualScheduler"), "spawn failed: {}", e);
        }
    }
}
