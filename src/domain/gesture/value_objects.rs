use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Client-space pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor, Display, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Per-axis absolute displacement from `origin`.
    pub fn abs_delta_from(&self, origin: Point) -> (f64, f64) {
        ((self.x - origin.x).abs(), (self.y - origin.y).abs())
    }
}

/// Input family a press came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum PressSource {
    Touch,
    Mouse,
}

/// Payload handed to the long-press and click callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct PressInfo {
    pub position: Point,
    pub source: PressSource,
}

/// How a press-to-release cycle resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PressOutcome {
    /// Click callback fired.
    Click,
    /// Long-press callback fired earlier in this cycle; click suppressed.
    LongPress,
    /// Movement exceeded tolerance; neither callback fired.
    Moved,
    /// Pointer left or touch was cancelled mid-press.
    Aborted,
    /// Release without an active session.
    Ignored,
}

/// Externally observable pull-to-refresh lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    StrumDisplay,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PullState {
    #[default]
    Idle,
    Pulling,
    Threshold,
    Refreshing,
    Complete,
}

impl PullState {
    /// A refresh is in flight or its completion is still on screen.
    pub fn is_busy(&self) -> bool {
        matches!(self, PullState::Refreshing | PullState::Complete)
    }

    /// A drag is currently producing visible pull.
    pub fn is_dragging(&self) -> bool {
        matches!(self, PullState::Pulling | PullState::Threshold)
    }
}

/// Axis a drag committed to once it crossed the lock distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum DirectionLock {
    Vertical,
    Horizontal,
}

impl DirectionLock {
    /// `None` until either axis exceeds `lock_distance`; ties go vertical.
    pub fn decide(dx: f64, dy: f64, lock_distance: f64) -> Option<Self> {
        let (abs_dx, abs_dy) = (dx.abs(), dy.abs());
        if abs_dx > lock_distance || abs_dy > lock_distance {
            Some(if abs_dx > abs_dy { DirectionLock::Horizontal } else { DirectionLock::Vertical })
        } else {
            None
        }
    }
}

/// What the renderer polls: resisted distance plus lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullSnapshot {
    pub pull_distance: f64,
    pub state: PullState,
}

/// Instruction back to the binding after a touch-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResponse {
    pub prevent_default: bool,
}

impl MoveResponse {
    pub const PASS_THROUGH: MoveResponse = MoveResponse { prevent_default: false };
    pub const CAPTURE: MoveResponse = MoveResponse { prevent_default: true };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn direction_lock_waits_for_lock_distance() {
        assert_eq!(DirectionLock::decide(6.0, 9.0, 10.0), None);
        assert_eq!(DirectionLock::decide(3.0, 11.0, 10.0), Some(DirectionLock::Vertical));
        assert_eq!(DirectionLock::decide(30.0, 5.0, 10.0), Some(DirectionLock::Horizontal));
        assert_eq!(DirectionLock::decide(-12.0, 12.0, 10.0), Some(DirectionLock::Vertical));
    }

    #[test]
    fn pull_state_string_forms_are_lowercase() {
        assert_eq!(PullState::Refreshing.to_string(), "refreshing");
        assert_eq!(PullState::from_str("threshold").unwrap(), PullState::Threshold);
        assert!(PullState::Complete.is_busy());
        assert!(!PullState::Pulling.is_busy());
    }
}
