use std::cell::Cell;
use std::rc::Rc;

use etf_gestures_wasm::application::LongPressRecognizer;
use etf_gestures_wasm::domain::errors::GestureError;
use etf_gestures_wasm::domain::gesture::{LongPressOptions, Point, PressOutcome, PressSource};
use etf_gestures_wasm::infrastructure::{ManualScheduler, RecordingHaptics};
use quickcheck_macros::quickcheck;

const DELAY: u64 = 500;

struct Fixture {
    scheduler: ManualScheduler,
    haptics: Rc<RecordingHaptics>,
    clicks: Rc<Cell<u32>>,
    long_presses: Rc<Cell<u32>>,
    last_long_press_source: Rc<Cell<Option<PressSource>>>,
    recognizer: LongPressRecognizer<ManualScheduler>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_options(LongPressOptions::default())
    }

    fn with_options(options: LongPressOptions) -> Self {
        let scheduler = ManualScheduler::new();
        let haptics = Rc::new(RecordingHaptics::new());
        let clicks = Rc::new(Cell::new(0));
        let long_presses = Rc::new(Cell::new(0));
        let last_long_press_source = Rc::new(Cell::new(None));

        let on_long_press = {
            let long_presses = long_presses.clone();
            let source = last_long_press_source.clone();
            move |info: etf_gestures_wasm::domain::gesture::PressInfo| {
                long_presses.set(long_presses.get() + 1);
                source.set(Some(info.source));
            }
        };
        let on_click = {
            let clicks = clicks.clone();
            move |_| clicks.set(clicks.get() + 1)
        };

        let recognizer =
            LongPressRecognizer::new(scheduler.clone(), haptics.clone(), on_long_press, on_click, options)
                .unwrap();
        Self { scheduler, haptics, clicks, long_presses, last_long_press_source, recognizer }
    }

    fn counts(&self) -> (u32, u32) {
        (self.clicks.get(), self.long_presses.get())
    }
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn tap_fires_click_once() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    assert!(f.recognizer.is_pressed());

    assert_eq!(f.recognizer.touch_end(p(100.0, 100.0)), PressOutcome::Click);
    assert_eq!(f.counts(), (1, 0));
    assert!(!f.recognizer.is_pressed());

    f.scheduler.advance(DELAY * 2);
    assert_eq!(f.counts(), (1, 0));
}

#[test]
fn small_jitter_still_clicks() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.recognizer.touch_move(p(105.0, 105.0));
    assert_eq!(f.recognizer.touch_end(p(105.0, 105.0)), PressOutcome::Click);
    assert_eq!(f.counts(), (1, 0));
}

#[test]
fn movement_past_tolerance_blocks_both_callbacks() {
    for target in [p(100.0, 120.0), p(120.0, 100.0), p(111.0, 100.0), p(100.0, 89.0)] {
        let f = Fixture::new();
        f.recognizer.touch_start(p(100.0, 100.0));
        f.recognizer.touch_move(target);
        f.scheduler.advance(DELAY);
        assert_eq!(f.recognizer.touch_end(target), PressOutcome::Moved, "move to {}", target);
        assert_eq!(f.counts(), (0, 0), "move to {}", target);
    }
}

#[test]
fn exactly_ten_pixels_is_still_a_tap() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.recognizer.touch_move(p(110.0, 90.0));
    assert_eq!(f.recognizer.touch_end(p(110.0, 90.0)), PressOutcome::Click);
}

#[test]
fn long_press_fires_after_delay_and_suppresses_click() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));

    f.scheduler.advance(DELAY - 1);
    assert_eq!(f.counts(), (0, 0));
    assert!(!f.recognizer.long_press_fired());

    f.scheduler.advance(1);
    assert_eq!(f.counts(), (0, 1));
    assert!(f.recognizer.long_press_fired());
    assert_eq!(f.last_long_press_source.get(), Some(PressSource::Touch));
    assert_eq!(f.haptics.pulses(), vec![10]);

    assert_eq!(f.recognizer.touch_end(p(100.0, 100.0)), PressOutcome::LongPress);
    assert_eq!(f.counts(), (0, 1));
}

#[test]
fn movement_before_delay_cancels_long_press() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.scheduler.advance(300);
    f.recognizer.touch_move(p(100.0, 115.0));
    assert_eq!(f.scheduler.pending_timers(), 0);

    f.scheduler.advance(200);
    assert_eq!(f.counts(), (0, 0));
    assert_eq!(f.recognizer.touch_end(p(100.0, 115.0)), PressOutcome::Moved);
    assert_eq!(f.haptics.count(), 0);
}

#[test]
fn scroll_cancelled_gesture_does_not_suppress_next_tap() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.recognizer.touch_move(p(100.0, 160.0));
    f.recognizer.touch_end(p(100.0, 160.0));

    f.recognizer.touch_start(p(50.0, 50.0));
    assert_eq!(f.recognizer.touch_end(p(50.0, 50.0)), PressOutcome::Click);
    assert_eq!(f.counts(), (1, 0));
}

#[test]
fn fired_long_press_does_not_suppress_next_tap() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.scheduler.advance(DELAY);
    f.recognizer.touch_end(p(100.0, 100.0));

    f.recognizer.touch_start(p(100.0, 100.0));
    assert!(!f.recognizer.long_press_fired());
    assert_eq!(f.recognizer.touch_end(p(100.0, 100.0)), PressOutcome::Click);
    assert_eq!(f.counts(), (1, 1));
}

#[test]
fn mouse_follows_the_same_rules() {
    let f = Fixture::new();
    f.recognizer.mouse_down(p(10.0, 10.0), 0);
    assert_eq!(f.recognizer.mouse_up(p(10.0, 10.0)), PressOutcome::Click);

    f.recognizer.mouse_down(p(10.0, 10.0), 0);
    f.scheduler.advance(DELAY);
    assert_eq!(f.last_long_press_source.get(), Some(PressSource::Mouse));
    assert_eq!(f.recognizer.mouse_up(p(10.0, 10.0)), PressOutcome::LongPress);

    f.recognizer.mouse_down(p(10.0, 10.0), 0);
    f.recognizer.mouse_move(p(30.0, 10.0));
    assert_eq!(f.recognizer.mouse_up(p(30.0, 10.0)), PressOutcome::Moved);

    assert_eq!(f.counts(), (1, 1));
}

#[test]
fn non_primary_button_never_starts_a_session() {
    let f = Fixture::new();
    f.recognizer.mouse_down(p(10.0, 10.0), 2);
    assert!(!f.recognizer.is_pressed());
    assert_eq!(f.scheduler.pending_timers(), 0);

    f.scheduler.advance(DELAY);
    assert_eq!(f.recognizer.mouse_up(p(10.0, 10.0)), PressOutcome::Ignored);
    assert_eq!(f.counts(), (0, 0));
}

#[test]
fn leave_and_cancel_abort_without_firing() {
    let f = Fixture::new();
    f.recognizer.mouse_down(p(10.0, 10.0), 0);
    assert_eq!(f.recognizer.mouse_leave(), PressOutcome::Aborted);
    f.scheduler.advance(DELAY);

    f.recognizer.touch_start(p(10.0, 10.0));
    assert_eq!(f.recognizer.touch_cancel(), PressOutcome::Aborted);
    f.scheduler.advance(DELAY);

    assert_eq!(f.counts(), (0, 0));
    assert_eq!(f.recognizer.mouse_leave(), PressOutcome::Ignored);
    assert_eq!(f.recognizer.touch_end(p(10.0, 10.0)), PressOutcome::Ignored);
}

#[test]
fn moves_without_a_session_are_ignored() {
    let f = Fixture::new();
    f.recognizer.touch_move(p(500.0, 500.0));
    f.recognizer.mouse_move(p(500.0, 500.0));
    assert!(!f.recognizer.is_pressed());
    assert_eq!(f.counts(), (0, 0));
}

#[test]
fn restarting_a_press_replaces_the_pending_timer() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.scheduler.advance(300);
    f.recognizer.touch_start(p(100.0, 100.0));
    assert_eq!(f.scheduler.pending_timers(), 1);

    f.scheduler.advance(200);
    assert_eq!(f.counts(), (0, 0));
    f.scheduler.advance(300);
    assert_eq!(f.counts(), (0, 1));
}

#[test]
fn dispose_cancels_pending_long_press() {
    let f = Fixture::new();
    f.recognizer.touch_start(p(100.0, 100.0));
    f.recognizer.dispose();
    assert_eq!(f.scheduler.pending_timers(), 0);

    f.scheduler.advance(DELAY * 2);
    assert_eq!(f.counts(), (0, 0));
    assert!(!f.recognizer.is_pressed());
}

#[test]
fn custom_delay_is_honoured() {
    let f = Fixture::with_options(LongPressOptions::with_delay(800));
    f.recognizer.touch_start(p(0.0, 0.0));
    f.scheduler.advance(DELAY);
    assert_eq!(f.counts(), (0, 0));
    f.scheduler.advance(300);
    assert_eq!(f.counts(), (0, 1));
}

#[test]
fn zero_delay_is_rejected() {
    let result = LongPressRecognizer::new(
        ManualScheduler::new(),
        Rc::new(RecordingHaptics::new()),
        |_| {},
        |_| {},
        LongPressOptions::with_delay(0),
    );
    assert!(matches!(result, Err(GestureError::InvalidConfig(_))));
}

#[quickcheck]
fn at_most_one_callback_per_press(moves: Vec<(i8, i8)>, hold_ms: u16) -> bool {
    let f = Fixture::new();
    let origin = p(100.0, 100.0);
    f.recognizer.touch_start(origin);

    let step = u64::from(hold_ms) / (moves.len() as u64 + 1);
    let mut last = origin;
    for (dx, dy) in moves {
        f.scheduler.advance(step);
        last = p(origin.x + f64::from(dx), origin.y + f64::from(dy));
        f.recognizer.touch_move(last);
    }
    f.scheduler.advance(step);
    let outcome = f.recognizer.touch_end(last);

    let (clicks, long_presses) = f.counts();
    clicks + long_presses <= 1
        && match outcome {
            PressOutcome::Click => clicks == 1,
            PressOutcome::LongPress => long_presses == 1,
            PressOutcome::Moved => clicks + long_presses == 0,
            PressOutcome::Aborted | PressOutcome::Ignored => false,
        }
}
