//! Leptos bindings that feed browser events into the gesture cores.

use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

use leptos::html::Div;
use leptos::*;
use web_sys::{MouseEvent, TouchEvent, TouchList};

use crate::application::{LongPressRecognizer, PullToRefreshController};
use crate::domain::errors::GestureResult;
use crate::domain::gesture::{
    LongPressOptions, Point, PressInfo, PressOutcome, PullEvent, PullState, PullToRefreshOptions,
    ScrollSurface,
};
use crate::domain::logging::LogComponent;
use crate::event_utils::{EventListenerHandle, EventOptions, event_listener_with_options};
use crate::infrastructure::{BrowserScheduler, NavigatorHaptics, element_scroll_top};
use crate::{log_trace, log_warn};

const COMPONENT: LogComponent = LogComponent::Presentation("Hooks");

pub type BrowserLongPress = LongPressRecognizer<BrowserScheduler>;
pub type BrowserPullToRefresh = PullToRefreshController<BrowserScheduler>;

fn first_touch(list: &TouchList) -> Option<Point> {
    list.get(0).map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn mouse_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Event handlers for one long-pressable element.
#[derive(Clone)]
pub struct LongPressHandlers {
    recognizer: BrowserLongPress,
    touch_end_guard: Rc<RefCell<Option<EventListenerHandle>>>,
}

impl LongPressHandlers {
    pub fn new(recognizer: BrowserLongPress) -> Self {
        Self { recognizer, touch_end_guard: Rc::new(RefCell::new(None)) }
    }

    /// Whether the non-passive `touchend` guard is currently attached.
    pub fn is_guard_armed(&self) -> bool {
        self.touch_end_guard.borrow().is_some()
    }

    pub fn on_touch_start(&self, ev: &TouchEvent) {
        let Some(point) = first_touch(&ev.touches()) else {
            return;
        };
        self.arm_touch_end_guard(ev);
        self.recognizer.touch_start(point);
    }

    pub fn on_touch_move(&self, ev: &TouchEvent) {
        if let Some(point) = first_touch(&ev.touches()) {
            self.recognizer.touch_move(point);
        }
    }

    pub fn on_touch_end(&self, ev: &TouchEvent) {
        let point = first_touch(&ev.changed_touches()).unwrap_or_default();
        let outcome = self.recognizer.touch_end(point);
        if outcome == PressOutcome::LongPress && self.recognizer.options().prevent_touch_end_default {
            ev.prevent_default();
        }
        self.disarm_touch_end_guard();
    }

    pub fn on_touch_cancel(&self, _ev: &TouchEvent) {
        self.recognizer.touch_cancel();
        self.disarm_touch_end_guard();
    }

    pub fn on_mouse_down(&self, ev: &MouseEvent) {
        self.recognizer.mouse_down(mouse_point(ev), ev.button());
    }

    pub fn on_mouse_move(&self, ev: &MouseEvent) {
        self.recognizer.mouse_move(mouse_point(ev));
    }

    pub fn on_mouse_up(&self, ev: &MouseEvent) {
        self.recognizer.mouse_up(mouse_point(ev));
    }

    pub fn on_mouse_leave(&self, _ev: &MouseEvent) {
        self.recognizer.mouse_leave();
    }

    pub fn dispose(&self) {
        self.disarm_touch_end_guard();
        self.recognizer.dispose();
    }

    /// Non-passive `touchend` on the touched node, so the synthetic click
    /// after a long press can be suppressed.
    fn arm_touch_end_guard(&self, ev: &TouchEvent) {
        self.disarm_touch_end_guard();
        if !self.recognizer.options().prevent_touch_end_default {
            return;
        }
        let Some(target) = ev.target() else {
            return;
        };

        let recognizer = self.recognizer.clone();
        let guard = event_listener_with_options(
            &target,
            ev::touchend,
            &EventOptions::active(),
            move |end: TouchEvent| {
                if end.touches().length() < 2 && recognizer.long_press_fired() {
                    end.prevent_default();
                }
            },
        );
        match guard {
            Ok(handle) => *self.touch_end_guard.borrow_mut() = Some(handle),
            Err(e) => log_warn!(COMPONENT, "touchend guard not attached: {}", e),
        }
    }

    fn disarm_touch_end_guard(&self) {
        if let Some(handle) = self.touch_end_guard.borrow_mut().take() {
            handle.remove();
        }
    }
}

/// Long-press/tap recognition for one element, disposed with the owning scope.
pub fn use_long_press<L, C>(
    on_long_press: L,
    on_click: C,
    options: LongPressOptions,
) -> GestureResult<LongPressHandlers>
where
    L: Fn(PressInfo) + 'static,
    C: Fn(PressInfo) + 'static,
{
    let recognizer = LongPressRecognizer::new(
        BrowserScheduler::new(),
        Rc::new(NavigatorHaptics::new()),
        on_long_press,
        on_click,
        options,
    )?;
    let handlers = LongPressHandlers::new(recognizer);

    let teardown = handlers.clone();
    on_cleanup(move || teardown.dispose());
    Ok(handlers)
}

/// Scroll offset of a container that may not be mounted yet.
struct NodeRefSurface(NodeRef<Div>);

impl ScrollSurface for NodeRefSurface {
    fn scroll_top(&self) -> f64 {
        self.0.get_untracked().map(|div| element_scroll_top(&div)).unwrap_or(0.0)
    }
}

/// Reactive view of a pull-to-refresh controller.
#[derive(Clone)]
pub struct PullToRefreshSignals {
    pub pull_distance: ReadSignal<f64>,
    pub state: ReadSignal<PullState>,
    pub threshold: f64,
    controller: BrowserPullToRefresh,
}

impl PullToRefreshSignals {
    pub fn controller(&self) -> &BrowserPullToRefresh {
        &self.controller
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.controller.set_disabled(disabled);
    }
}

/// Wires touch events on `target` into `controller`. Only `touchmove` is
/// non-passive, and it cancels scrolling only while a downward pull is tracked.
pub fn attach_pull_listeners(
    target: &web_sys::EventTarget,
    controller: &BrowserPullToRefresh,
) -> Vec<EventListenerHandle> {
    let passive = EventOptions::default();

    let start = controller.clone();
    let on_start = event_listener_with_options(target, ev::touchstart, &passive, move |ev: TouchEvent| {
        if let Some(point) = first_touch(&ev.touches()) {
            start.touch_start(point);
        }
    });

    let drag = controller.clone();
    let on_move = event_listener_with_options(target, ev::touchmove, &EventOptions::active(), move |ev: TouchEvent| {
        if let Some(point) = first_touch(&ev.touches()) {
            if drag.touch_move(point).prevent_default {
                ev.prevent_default();
            }
        }
    });

    let end = controller.clone();
    let on_end = event_listener_with_options(target, ev::touchend, &passive, move |_: TouchEvent| {
        end.touch_end();
    });

    let cancel = controller.clone();
    let on_cancel = event_listener_with_options(target, ev::touchcancel, &passive, move |_: TouchEvent| {
        cancel.touch_cancel();
    });

    let mut attached = Vec::with_capacity(4);
    for handle in [on_start, on_move, on_end, on_cancel] {
        match handle {
            Ok(handle) => {
                log_trace!(COMPONENT, "{} listener attached", handle.event_name());
                attached.push(handle);
            }
            Err(e) => log_warn!(COMPONENT, "pull-to-refresh listener not attached: {}", e),
        }
    }
    attached
}

/// Pull-to-refresh on the container behind `scroll_ref`.
pub fn use_pull_to_refresh<F, Fut, E>(
    scroll_ref: NodeRef<Div>,
    on_refresh: F,
    options: PullToRefreshOptions,
) -> GestureResult<PullToRefreshSignals>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<(), E>> + 'static,
    E: Display + 'static,
{
    let controller = PullToRefreshController::new(
        BrowserScheduler::new(),
        Rc::new(NavigatorHaptics::new()),
        Rc::new(NodeRefSurface(scroll_ref)),
        options,
        on_refresh,
    )?;

    let (pull_distance, set_pull_distance) = create_signal(0.0);
    let (state, set_state) = create_signal(PullState::Idle);
    controller.subscribe(move |event| match event {
        PullEvent::StateChanged { to, .. } => set_state.set(*to),
        PullEvent::DistanceChanged { distance } => set_pull_distance.set(*distance),
        PullEvent::RefreshStarted | PullEvent::RefreshSettled { .. } => {}
    });

    let listeners: Rc<RefCell<Vec<EventListenerHandle>>> = Rc::new(RefCell::new(Vec::new()));

    {
        let controller = controller.clone();
        let listeners = listeners.clone();
        scroll_ref.on_load(move |div| {
            listeners.borrow_mut().extend(attach_pull_listeners(&div, &controller));
        });
    }

    {
        let controller = controller.clone();
        on_cleanup(move || {
            for handle in listeners.borrow_mut().drain(..) {
                handle.remove();
            }
            controller.dispose();
        });
    }

    Ok(PullToRefreshSignals { pull_distance, state, threshold: options.threshold, controller })
}
