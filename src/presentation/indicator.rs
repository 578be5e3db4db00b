use leptos::*;
use serde::Serialize;
use strum::AsRefStr;

use crate::domain::gesture::PullState;

/// Fixed indicator height while the refresh runs and while "done" shows.
pub const SETTLED_HEIGHT_PX: f64 = 48.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IndicatorIcon {
    Arrow,
    Spinner,
    Check,
}

/// Everything the indicator needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorModel {
    pub height_px: f64,
    pub opacity: f64,
    pub progress: f64,
    pub rotation_deg: f64,
    pub icon: Option<IndicatorIcon>,
    pub label: Option<&'static str>,
    /// Primary colour once the pull qualifies; muted while still short.
    pub emphasized: bool,
    /// Height/opacity animate only when the finger is not driving them.
    pub animated: bool,
}

impl IndicatorModel {
    pub fn new(pull_distance: f64, state: PullState, threshold: f64) -> Self {
        let progress = if threshold > 0.0 { (pull_distance / threshold).clamp(0.0, 1.0) } else { 1.0 };

        let height_px = match state {
            PullState::Idle => 0.0,
            PullState::Refreshing | PullState::Complete => SETTLED_HEIGHT_PX,
            PullState::Pulling | PullState::Threshold => pull_distance.max(0.0),
        };

        let (icon, label, rotation_deg) = match state {
            PullState::Idle => (None, None, 0.0),
            PullState::Pulling => (Some(IndicatorIcon::Arrow), Some("下拉刷新"), progress * 180.0),
            PullState::Threshold => (Some(IndicatorIcon::Arrow), Some("释放刷新"), 180.0),
            PullState::Refreshing => (Some(IndicatorIcon::Spinner), Some("正在刷新..."), 0.0),
            PullState::Complete => (Some(IndicatorIcon::Check), Some("刷新完成"), 0.0),
        };

        Self {
            height_px,
            opacity: if state == PullState::Idle { 0.0 } else { 1.0 },
            progress,
            rotation_deg,
            icon,
            label,
            emphasized: matches!(state, PullState::Threshold | PullState::Refreshing | PullState::Complete),
            animated: !state.is_dragging(),
        }
    }

    pub fn container_style(&self) -> String {
        format!("height: {}px; opacity: {};", self.height_px, self.opacity)
    }

    pub fn icon_style(&self) -> String {
        format!("transform: rotate({}deg);", self.rotation_deg)
    }
}

/// Collapsible strip above the list showing pull progress and refresh status.
#[component]
pub fn PullToRefreshIndicator(
    #[prop(into)] pull_distance: Signal<f64>,
    #[prop(into)] state: Signal<PullState>,
    threshold: f64,
) -> impl IntoView {
    let model = create_memo(move |_| IndicatorModel::new(pull_distance.get(), state.get(), threshold));

    view! {
        <div
            class="ptr-indicator"
            class:ptr-animated=move || model.with(|m| m.animated)
            style=move || model.with(IndicatorModel::container_style)
        >
            <div class="ptr-indicator-body">
                {move || {
                    model.with(|m| {
                        m.icon.map(|icon| {
                            let tone = if m.emphasized { "ptr-primary" } else { "ptr-muted" };
                            view! {
                                <span
                                    class=format!("ptr-icon ptr-icon-{} {}", icon.as_ref(), tone)
                                    style=m.icon_style()
                                ></span>
                                <span class=format!("ptr-label {}", tone)>{m.label}</span>
                            }
                        })
                    })
                }}
            </div>
        </div>
    }
}
