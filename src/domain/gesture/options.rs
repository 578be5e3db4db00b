use serde::{Deserialize, Serialize};

use crate::domain::errors::{GestureError, GestureResult};

/// Either axis must move further than this for a press to count as a drag.
pub const MOVE_TOLERANCE_PX: f64 = 10.0;
/// Either axis must move further than this before a pull commits to an axis.
pub const DIRECTION_LOCK_DISTANCE_PX: f64 = 10.0;
/// Some platforms report fractional `scrollTop` while visually at the top.
pub const SCROLL_TOP_TOLERANCE_PX: f64 = 1.0;
pub const REFRESH_TIMEOUT_MS: u32 = 15_000;
pub const COMPLETE_DISPLAY_MS: u32 = 400;
pub const HAPTIC_PULSE_MS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LongPressOptions {
    /// Guard the originating target's `touchend` so a long press does not
    /// also produce the platform's synthetic click.
    pub prevent_touch_end_default: bool,
    pub delay_ms: u32,
}

impl Default for LongPressOptions {
    fn default() -> Self {
        Self { prevent_touch_end_default: true, delay_ms: 500 }
    }
}

impl LongPressOptions {
    pub fn with_delay(delay_ms: u32) -> Self {
        Self { delay_ms, ..Self::default() }
    }

    pub fn validate(&self) -> GestureResult<()> {
        if self.delay_ms == 0 {
            return Err(GestureError::InvalidConfig("long-press delay must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PullToRefreshOptions {
    pub threshold: f64,
    pub max_pull: f64,
    pub cooldown_ms: u64,
    pub disabled: bool,
}

impl Default for PullToRefreshOptions {
    fn default() -> Self {
        Self { threshold: 80.0, max_pull: 120.0, cooldown_ms: 3_000, disabled: false }
    }
}

impl PullToRefreshOptions {
    pub fn validate(&self) -> GestureResult<()> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if !(self.max_pull.is_finite() && self.max_pull > 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "maxPull must be a positive number, got {}",
                self.max_pull
            )));
        }
        Ok(())
    }
}
