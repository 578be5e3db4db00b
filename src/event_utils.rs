use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::domain::errors::{GestureError, GestureResult};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

impl EventOptions {
    /// Listener that may call `preventDefault`.
    pub fn active() -> Self {
        Self { passive: false, ..Self::default() }
    }
}

/// Keeps the JS closure alive until [`EventListenerHandle::remove`].
pub struct EventListenerHandle {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
    passive: bool,
}

impl EventListenerHandle {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// A passive listener's `preventDefault` is ignored by the browser.
    pub fn is_passive(&self) -> bool {
        self.passive
    }

    pub fn remove(self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

pub fn event_listener_with_options<E>(
    target: &EventTarget,
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> GestureResult<EventListenerHandle>
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let event_name = event.name().into_owned();
    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    }) as Box<dyn FnMut(Event)>);

    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            &event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| GestureError::BrowserApi(format!("addEventListener({event_name}): {e:?}")))?;

    Ok(EventListenerHandle {
        target: target.clone(),
        event_name,
        callback,
        capture: options.capture,
        passive: options.passive,
    })
}
