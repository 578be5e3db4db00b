#![cfg(not(feature = "logic-only"))]
use etf_gestures_wasm::domain::gesture::PullState;
use etf_gestures_wasm::presentation::{IndicatorIcon, IndicatorModel};
use insta::assert_json_snapshot;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Serialize)]
struct Frame {
    state: PullState,
    icon: Option<IndicatorIcon>,
    emphasized: bool,
    animated: bool,
}

#[test]
fn icon_and_tone_per_state() {
    let frames: Vec<Frame> = PullState::iter()
        .map(|state| {
            let model = IndicatorModel::new(40.0, state, 80.0);
            Frame { state, icon: model.icon, emphasized: model.emphasized, animated: model.animated }
        })
        .collect();

    assert_json_snapshot!(frames, @r###"
    [
      {
        "state": "idle",
        "icon": null,
        "emphasized": false,
        "animated": true
      },
      {
        "state": "pulling",
        "icon": "arrow",
        "emphasized": false,
        "animated": false
      },
      {
        "state": "threshold",
        "icon": "arrow",
        "emphasized": true,
        "animated": false
      },
      {
        "state": "refreshing",
        "icon": "spinner",
        "emphasized": true,
        "animated": true
      },
      {
        "state": "complete",
        "icon": "check",
        "emphasized": true,
        "animated": true
      }
    ]
    "###);
}

#[test]
fn labels_follow_state() {
    let label = |state| IndicatorModel::new(90.0, state, 80.0).label;
    assert_eq!(label(PullState::Idle), None);
    assert_eq!(label(PullState::Pulling), Some("下拉刷新"));
    assert_eq!(label(PullState::Threshold), Some("释放刷新"));
    assert_eq!(label(PullState::Refreshing), Some("正在刷新..."));
    assert_eq!(label(PullState::Complete), Some("刷新完成"));
}

#[test]
fn progress_is_capped_and_threshold_arrow_is_flipped() {
    let pulling = IndicatorModel::new(120.0, PullState::Pulling, 80.0);
    assert_eq!(pulling.progress, 1.0);
    assert_eq!(pulling.rotation_deg, 180.0);

    let threshold = IndicatorModel::new(85.0, PullState::Threshold, 80.0);
    assert_eq!(threshold.rotation_deg, 180.0);
    assert_eq!(threshold.height_px, 85.0);
    assert_eq!(threshold.icon_style(), "transform: rotate(180deg);");
}

#[test]
fn container_style_reflects_height_and_opacity() {
    assert_eq!(IndicatorModel::new(0.0, PullState::Idle, 80.0).container_style(), "height: 0px; opacity: 0;");
    assert_eq!(
        IndicatorModel::new(0.0, PullState::Refreshing, 80.0).container_style(),
        "height: 48px; opacity: 1;"
    );
}
