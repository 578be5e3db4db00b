#![cfg(feature = "logic-only")]

use std::rc::Rc;

use etf_gestures_wasm::GestureConfig;
use etf_gestures_wasm::application::LongPressRecognizer;
use etf_gestures_wasm::domain::gesture::{Point, PressOutcome};
use etf_gestures_wasm::infrastructure::{ManualScheduler, NoHaptics};

#[test]
fn cores_work_without_the_view_layer() {
    let config = GestureConfig::from_json(r#"{"longPress":{"delayMs":300}}"#).unwrap();
    let scheduler = ManualScheduler::new();
    let recognizer =
        LongPressRecognizer::new(scheduler.clone(), Rc::new(NoHaptics), |_| {}, |_| {}, config.long_press)
            .unwrap();

    recognizer.touch_start(Point::new(1.0, 1.0));
    scheduler.advance(300);
    assert_eq!(recognizer.touch_end(Point::new(1.0, 1.0)), PressOutcome::LongPress);
}
