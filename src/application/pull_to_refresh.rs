use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::application::refresh::run_refresh;
use crate::domain::errors::{GestureError, GestureResult};
use crate::domain::gesture::options::{
    COMPLETE_DISPLAY_MS, DIRECTION_LOCK_DISTANCE_PX, HAPTIC_PULSE_MS, REFRESH_TIMEOUT_MS,
    SCROLL_TOP_TOLERANCE_PX,
};
use crate::domain::gesture::{
    DirectionLock, DomainEvent, Haptics, MoveResponse, Point, PullEvent, PullSnapshot, PullState,
    PullToRefreshOptions, ResistanceCurve, Scheduler, ScrollSurface, SubscriptionId, Subscribers,
    TimerHandle,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info, log_trace, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("PullToRefresh");

type RefreshFn = Box<dyn Fn() -> LocalBoxFuture<'static, Result<(), String>>>;

/// Touch tracking for the gesture currently under the finger.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    /// No touch in progress (or the last one ended).
    Inactive,
    /// Touch-start was refused: disabled, busy or cooling down.
    Rejected,
    /// Touch-start happened away from the top; waiting for late activation.
    AwaitingTop,
    /// Start captured; `lock` is decided once the drag passes the lock distance.
    Active { start: Point, lock: Option<DirectionLock> },
}

struct PullSession {
    state: PullState,
    pull_distance: f64,
    tracking: Tracking,
    last_refresh_at: Option<u64>,
}

struct Shared<S: Scheduler> {
    scheduler: S,
    haptics: Rc<dyn Haptics>,
    surface: Rc<dyn ScrollSurface>,
    options: PullToRefreshOptions,
    curve: ResistanceCurve,
    disabled: Cell<bool>,
    disposed: Cell<bool>,
    on_refresh: RefreshFn,
    session: RefCell<PullSession>,
    complete_timer: RefCell<Option<S::Timer>>,
    subscribers: Subscribers<PullEvent>,
}

/// Turns raw touches on a scroll container into a pull-to-refresh lifecycle.
///
/// `Idle → Pulling → Threshold → Refreshing → Complete → Idle`, with
/// releases below threshold and upward reversals going straight back to
/// `Idle`. The refresh callback runs at most once per qualifying release.
pub struct PullToRefreshController<S: Scheduler> {
    shared: Rc<Shared<S>>,
}

impl<S: Scheduler> Clone for PullToRefreshController<S> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<S: Scheduler> PullToRefreshController<S> {
    pub fn new<F, Fut, E>(
        scheduler: S,
        haptics: Rc<dyn Haptics>,
        surface: Rc<dyn ScrollSurface>,
        options: PullToRefreshOptions,
        on_refresh: F,
    ) -> GestureResult<Self>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: Display + 'static,
    {
        options.validate()?;
        let on_refresh: RefreshFn = Box::new(move || {
            on_refresh().map(|result| result.map_err(|e| e.to_string())).boxed_local()
        });
        Ok(Self {
            shared: Rc::new(Shared {
                scheduler,
                haptics,
                surface,
                curve: ResistanceCurve::new(options.threshold, options.max_pull),
                disabled: Cell::new(options.disabled),
                disposed: Cell::new(false),
                options,
                on_refresh,
                session: RefCell::new(PullSession {
                    state: PullState::Idle,
                    pull_distance: 0.0,
                    tracking: Tracking::Inactive,
                    last_refresh_at: None,
                }),
                complete_timer: RefCell::new(None),
                subscribers: Subscribers::new(),
            }),
        })
    }

    pub fn options(&self) -> &PullToRefreshOptions {
        &self.shared.options
    }

    pub fn snapshot(&self) -> PullSnapshot {
        let session = self.shared.session.borrow();
        PullSnapshot { pull_distance: session.pull_distance, state: session.state }
    }

    pub fn state(&self) -> PullState {
        self.shared.session.borrow().state
    }

    pub fn pull_distance(&self) -> f64 {
        self.shared.session.borrow().pull_distance
    }

    pub fn last_refresh_at(&self) -> Option<u64> {
        self.shared.session.borrow().last_refresh_at
    }

    pub fn is_disabled(&self) -> bool {
        self.shared.disabled.get()
    }

    /// Takes effect from the next touch-start; a gesture already in flight
    /// is abandoned.
    pub fn set_disabled(&self, disabled: bool) {
        self.shared.disabled.set(disabled);
        if disabled {
            self.cancel_gesture();
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PullEvent) + 'static,
    {
        self.shared.subscribers.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.unsubscribe(id)
    }

    pub fn touch_start(&self, position: Point) {
        let shared = &self.shared;
        let now = shared.scheduler.now();
        let at_top = shared.surface.scroll_top() <= SCROLL_TOP_TOLERANCE_PX;
        let mut session = shared.session.borrow_mut();

        let cooling_down = session
            .last_refresh_at
            .is_some_and(|at| now.saturating_sub(at) < shared.options.cooldown_ms);
        if shared.disabled.get() || session.state.is_busy() || cooling_down {
            log_trace!(COMPONENT, "touch-start ignored (state {}, cooling down {})", session.state, cooling_down);
            session.tracking = Tracking::Rejected;
            return;
        }

        session.tracking = if at_top {
            Tracking::Active { start: position, lock: None }
        } else {
            Tracking::AwaitingTop
        };
    }

    pub fn touch_move(&self, position: Point) -> MoveResponse {
        let mut events = Vec::new();
        let (response, crossed_threshold) = {
            let mut session = self.shared.session.borrow_mut();
            self.track_move(&mut session, position, &mut events)
        };

        if crossed_threshold {
            self.shared.haptics.pulse(HAPTIC_PULSE_MS);
        }
        self.publish_all(&events);
        response
    }

    pub fn touch_end(&self) {
        self.release(true);
    }

    /// The platform took the touch away: never refreshes.
    pub fn touch_cancel(&self) {
        self.release(false);
    }

    /// Teardown: drop the completion timer and all subscribers. A refresh
    /// still in flight settles into nothing.
    pub fn dispose(&self) {
        self.shared.disposed.set(true);
        if let Some(timer) = self.shared.complete_timer.borrow_mut().take() {
            timer.cancel();
        }
        self.shared.subscribers.clear();
        self.shared.session.borrow_mut().tracking = Tracking::Inactive;
    }

    /// Returns the move response and whether this move entered `Threshold`.
    fn track_move(
        &self,
        session: &mut PullSession,
        position: Point,
        events: &mut Vec<PullEvent>,
    ) -> (MoveResponse, bool) {
        let shared = &self.shared;
        if session.state.is_busy() || shared.disabled.get() {
            return (MoveResponse::PASS_THROUGH, false);
        }

        let (start, lock) = match session.tracking {
            Tracking::Inactive | Tracking::Rejected => return (MoveResponse::PASS_THROUGH, false),
            Tracking::AwaitingTop => {
                if shared.surface.scroll_top() <= SCROLL_TOP_TOLERANCE_PX {
                    // Arms the gesture; pulling starts from the next move.
                    session.tracking = Tracking::Active { start: position, lock: None };
                    log_trace!(COMPONENT, "late activation at {}", position);
                }
                return (MoveResponse::PASS_THROUGH, false);
            }
            Tracking::Active { start, lock } => (start, lock),
        };

        let delta_x = position.x - start.x;
        let delta_y = position.y - start.y;

        let lock = match lock {
            Some(lock) => lock,
            None => match DirectionLock::decide(delta_x, delta_y, DIRECTION_LOCK_DISTANCE_PX) {
                Some(decided) => {
                    session.tracking = Tracking::Active { start, lock: Some(decided) };
                    log_trace!(COMPONENT, "direction locked {}", decided);
                    decided
                }
                None => return (MoveResponse::PASS_THROUGH, false),
            },
        };

        if lock == DirectionLock::Horizontal {
            return (MoveResponse::PASS_THROUGH, false);
        }

        if delta_y <= 0.0 {
            if session.state.is_dragging() {
                Self::reset_pull(session, events);
            }
            return (MoveResponse::PASS_THROUGH, false);
        }

        let distance = shared.curve.apply(delta_y);
        Self::set_distance(session, distance, events);

        let mut crossed_threshold = false;
        // Threshold latches for the rest of the drag.
        if shared.curve.reaches_threshold(distance) || session.state == PullState::Threshold {
            if session.state != PullState::Threshold {
                Self::set_state(session, PullState::Threshold, events);
                crossed_threshold = true;
            }
        } else if distance > 0.0 && session.state != PullState::Pulling {
            Self::set_state(session, PullState::Pulling, events);
        }

        (MoveResponse::CAPTURE, crossed_threshold)
    }

    fn release(&self, may_refresh: bool) {
        let mut events = Vec::new();
        let start_refresh = {
            let mut session = self.shared.session.borrow_mut();
            let busy = session.state.is_busy();
            session.tracking = Tracking::Inactive;
            if busy {
                false
            } else if may_refresh && session.state == PullState::Threshold {
                Self::set_state(&mut session, PullState::Refreshing, &mut events);
                events.push(PullEvent::RefreshStarted);
                true
            } else {
                Self::reset_pull(&mut session, &mut events);
                false
            }
        };

        self.publish_all(&events);
        if start_refresh {
            self.execute_refresh();
        }
    }

    fn cancel_gesture(&self) {
        let mut events = Vec::new();
        {
            let mut session = self.shared.session.borrow_mut();
            session.tracking = Tracking::Inactive;
            if session.state.is_dragging() {
                Self::reset_pull(&mut session, &mut events);
            }
        }
        self.publish_all(&events);
    }

    fn execute_refresh(&self) {
        let shared = &self.shared;
        log_info!(COMPONENT, "refresh started");

        let refresh = (shared.on_refresh)();
        let timeout = shared.scheduler.sleep(REFRESH_TIMEOUT_MS);
        let weak = Rc::downgrade(shared);

        shared.scheduler.spawn_local(
            async move {
                let result = run_refresh(refresh, timeout, REFRESH_TIMEOUT_MS).await;
                if let Some(shared) = weak.upgrade() {
                    Self::complete_refresh(&shared, result);
                }
            }
            .boxed_local(),
        );
    }

    fn complete_refresh(shared: &Rc<Shared<S>>, result: Result<(), GestureError>) {
        if let Err(e) = &result {
            log_warn!(COMPONENT, "refresh did not succeed: {}", e);
        }
        if shared.disposed.get() {
            return;
        }

        let mut events = Vec::new();
        {
            let mut session = shared.session.borrow_mut();
            session.last_refresh_at = Some(shared.scheduler.now());
            Self::set_distance(&mut session, 0.0, &mut events);
            Self::set_state(&mut session, PullState::Complete, &mut events);
        }
        events.push(PullEvent::RefreshSettled { result });

        let weak: Weak<Shared<S>> = Rc::downgrade(shared);
        let timer = shared.scheduler.set_timeout(
            COMPLETE_DISPLAY_MS,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::settle_to_idle(&shared);
                }
            }),
        );
        if let Some(previous) = shared.complete_timer.borrow_mut().replace(timer) {
            previous.cancel();
        }

        Self::publish(shared, &events);
    }

    fn settle_to_idle(shared: &Shared<S>) {
        let mut events = Vec::new();
        {
            let mut session = shared.session.borrow_mut();
            if session.state == PullState::Complete {
                Self::set_state(&mut session, PullState::Idle, &mut events);
            }
        }
        Self::publish(shared, &events);
    }

    fn reset_pull(session: &mut PullSession, events: &mut Vec<PullEvent>) {
        Self::set_distance(session, 0.0, events);
        Self::set_state(session, PullState::Idle, events);
    }

    fn set_distance(session: &mut PullSession, distance: f64, events: &mut Vec<PullEvent>) {
        if session.pull_distance != distance {
            session.pull_distance = distance;
            events.push(PullEvent::DistanceChanged { distance });
        }
    }

    fn set_state(session: &mut PullSession, to: PullState, events: &mut Vec<PullEvent>) {
        let from = session.state;
        if from != to {
            session.state = to;
            events.push(PullEvent::StateChanged { from, to });
        }
    }

    fn publish_all(&self, events: &[PullEvent]) {
        Self::publish(&self.shared, events);
    }

    fn publish(shared: &Shared<S>, events: &[PullEvent]) {
        for event in events {
            if let PullEvent::StateChanged { from, to } = event {
                log_debug!(COMPONENT, "{}: {} -> {}", event.event_type(), from, to);
            }
            shared.subscribers.publish(event);
        }
    }
}
