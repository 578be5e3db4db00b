#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;

use etf_gestures_wasm::domain::gesture::{Haptics, Scheduler, ScrollSurface, TimerHandle};
use etf_gestures_wasm::infrastructure::{BrowserScheduler, NavigatorHaptics, element_scroll_top};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn browser_sleep_resolves() {
    let scheduler = BrowserScheduler::new();
    let before = scheduler.now();
    scheduler.sleep(20).await;
    assert!(scheduler.now() >= before + 15);
}

#[wasm_bindgen_test]
async fn cancelled_timeout_never_fires() {
    let scheduler = BrowserScheduler::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let timer = scheduler.set_timeout(10, Box::new(move || flag.set(true)));
    timer.cancel();

    TimeoutFuture::new(40).await;
    assert!(!fired.get());
}

#[wasm_bindgen_test]
async fn spawned_task_runs() {
    let scheduler = BrowserScheduler::new();
    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();
    scheduler.spawn_local(Box::pin(async move { flag.set(true) }));

    TimeoutFuture::new(0).await;
    assert!(ran.get());
}

#[wasm_bindgen_test]
fn haptics_pulse_is_best_effort() {
    NavigatorHaptics::new().pulse(10);
}

#[wasm_bindgen_test]
fn detached_element_reports_zero_scroll_top() {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    assert_eq!(element_scroll_top(&div), 0.0);
    assert_eq!(ScrollSurface::scroll_top(&div), 0.0);
}
