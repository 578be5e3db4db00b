use wasm_bindgen::JsValue;

use crate::domain::gesture::ScrollSurface;

/// `scrollTop` read through `Reflect`, so fractional offsets survive.
pub fn element_scroll_top(element: &web_sys::Element) -> f64 {
    js_sys::Reflect::get(element, &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_top()))
}

impl ScrollSurface for web_sys::Element {
    fn scroll_top(&self) -> f64 {
        element_scroll_top(self)
    }
}
