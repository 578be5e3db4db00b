use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::errors::GestureResult;
use crate::domain::gesture::options::{HAPTIC_PULSE_MS, MOVE_TOLERANCE_PX};
use crate::domain::gesture::{
    Haptics, LongPressOptions, Point, PressInfo, PressOutcome, PressSource, Scheduler, TimerHandle,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_trace};

const COMPONENT: LogComponent = LogComponent::Application("LongPress");

/// Primary mouse button as reported by `MouseEvent.button`.
pub const PRIMARY_BUTTON: i16 = 0;

/// One press-to-release cycle. `start == None` means no active session.
struct PressSession<T> {
    start: Option<Point>,
    source: PressSource,
    has_moved: bool,
    long_press_fired: bool,
    pending_timer: Option<T>,
}

impl<T: TimerHandle> PressSession<T> {
    fn idle() -> Self {
        Self {
            start: None,
            source: PressSource::Touch,
            has_moved: false,
            long_press_fired: false,
            pending_timer: None,
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending_timer.take() {
            timer.cancel();
        }
    }
}

struct Shared<S: Scheduler> {
    scheduler: S,
    haptics: Rc<dyn Haptics>,
    on_long_press: Box<dyn Fn(PressInfo)>,
    on_click: Box<dyn Fn(PressInfo)>,
    options: LongPressOptions,
    session: RefCell<PressSession<S::Timer>>,
}

/// Tells a tap from a long hold from a drag that started on the element.
///
/// Exactly one of {click, long press, neither} fires per press-to-release
/// cycle, and every press-start begins from a clean session.
pub struct LongPressRecognizer<S: Scheduler> {
    shared: Rc<Shared<S>>,
}

impl<S: Scheduler> Clone for LongPressRecognizer<S> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<S: Scheduler> LongPressRecognizer<S> {
    pub fn new<L, C>(
        scheduler: S,
        haptics: Rc<dyn Haptics>,
        on_long_press: L,
        on_click: C,
        options: LongPressOptions,
    ) -> GestureResult<Self>
    where
        L: Fn(PressInfo) + 'static,
        C: Fn(PressInfo) + 'static,
    {
        options.validate()?;
        Ok(Self {
            shared: Rc::new(Shared {
                scheduler,
                haptics,
                on_long_press: Box::new(on_long_press),
                on_click: Box::new(on_click),
                options,
                session: RefCell::new(PressSession::idle()),
            }),
        })
    }

    pub fn options(&self) -> &LongPressOptions {
        &self.shared.options
    }

    pub fn is_pressed(&self) -> bool {
        self.shared.session.borrow().start.is_some()
    }

    pub fn long_press_fired(&self) -> bool {
        self.shared.session.borrow().long_press_fired
    }

    pub fn touch_start(&self, position: Point) {
        self.begin(position, PressSource::Touch);
    }

    /// Only the primary button starts a session.
    pub fn mouse_down(&self, position: Point, button: i16) {
        if button != PRIMARY_BUTTON {
            log_trace!(COMPONENT, "ignoring mouse button {}", button);
            return;
        }
        self.begin(position, PressSource::Mouse);
    }

    pub fn touch_move(&self, position: Point) {
        self.track(position);
    }

    pub fn mouse_move(&self, position: Point) {
        self.track(position);
    }

    pub fn touch_end(&self, position: Point) -> PressOutcome {
        self.release(Some(position))
    }

    pub fn mouse_up(&self, position: Point) -> PressOutcome {
        self.release(Some(position))
    }

    /// Pointer left the hit area mid-press: abort without firing.
    pub fn mouse_leave(&self) -> PressOutcome {
        self.abort()
    }

    pub fn touch_cancel(&self) -> PressOutcome {
        self.abort()
    }

    /// Teardown: cancel anything still scheduled and forget the session.
    pub fn dispose(&self) {
        let mut session = self.shared.session.borrow_mut();
        session.cancel_timer();
        *session = PressSession::idle();
    }

    fn begin(&self, position: Point, source: PressSource) {
        let weak: Weak<Shared<S>> = Rc::downgrade(&self.shared);
        let timer = self.shared.scheduler.set_timeout(
            self.shared.options.delay_ms,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::fire_long_press(&shared);
                }
            }),
        );

        let mut session = self.shared.session.borrow_mut();
        session.cancel_timer();
        *session = PressSession {
            start: Some(position),
            source,
            has_moved: false,
            long_press_fired: false,
            pending_timer: Some(timer),
        };
        log_trace!(COMPONENT, "{} press started at {}", source, position);
    }

    fn track(&self, position: Point) {
        let mut session = self.shared.session.borrow_mut();
        let Some(start) = session.start else {
            return;
        };
        if session.has_moved {
            return;
        }
        let (dx, dy) = position.abs_delta_from(start);
        if dx > MOVE_TOLERANCE_PX || dy > MOVE_TOLERANCE_PX {
            session.has_moved = true;
            session.cancel_timer();
            log_trace!(COMPONENT, "movement ({:.1}, {:.1}) exceeds tolerance, press cancelled", dx, dy);
        }
    }

    fn release(&self, position: Option<Point>) -> PressOutcome {
        let (outcome, info) = {
            let mut session = self.shared.session.borrow_mut();
            session.cancel_timer();
            let outcome = match session.start {
                None => PressOutcome::Ignored,
                Some(_) if session.long_press_fired => PressOutcome::LongPress,
                Some(_) if session.has_moved => PressOutcome::Moved,
                Some(_) => PressOutcome::Click,
            };
            let info = PressInfo::new(position.or(session.start).unwrap_or_default(), session.source);
            *session = PressSession::idle();
            (outcome, info)
        };

        if outcome == PressOutcome::Click {
            log_debug!(COMPONENT, "click at {}", info.position);
            (self.shared.on_click)(info);
        }
        outcome
    }

    fn abort(&self) -> PressOutcome {
        let mut session = self.shared.session.borrow_mut();
        session.cancel_timer();
        let outcome = if session.start.is_some() { PressOutcome::Aborted } else { PressOutcome::Ignored };
        *session = PressSession::idle();
        outcome
    }

    fn fire_long_press(shared: &Shared<S>) {
        let info = {
            let mut session = shared.session.borrow_mut();
            match session.start {
                Some(start) if !session.has_moved && !session.long_press_fired => {
                    // The handle stays in the session: this callback belongs to it
                    // and the next exit path releases it.
                    session.long_press_fired = true;
                    PressInfo::new(start, session.source)
                }
                _ => return,
            }
        };

        log_debug!(COMPONENT, "long press at {}", info.position);
        (shared.on_long_press)(info);
        shared.haptics.pulse(HAPTIC_PULSE_MS);
    }
}

