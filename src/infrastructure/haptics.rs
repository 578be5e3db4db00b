use std::cell::RefCell;

use wasm_bindgen::JsValue;

use crate::domain::gesture::Haptics;
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// `navigator.vibrate`, when the browser has it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorHaptics;

impl NavigatorHaptics {
    pub fn new() -> Self {
        Self
    }

    pub fn is_supported() -> bool {
        web_sys::window()
            .map(|window| {
                js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("vibrate"))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }
}

impl Haptics for NavigatorHaptics {
    fn pulse(&self, duration_ms: u32) {
        if !Self::is_supported() {
            log_debug!(LogComponent::Infrastructure("Haptics"), "vibrate unavailable");
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(duration_ms);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _duration_ms: u32) {}
}

/// Remembers every pulse it was asked for.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: RefCell<Vec<u32>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> Vec<u32> {
        self.pulses.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.pulses.borrow().len()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&self, duration_ms: u32) {
        self.pulses.borrow_mut().push(duration_ms);
    }
}
