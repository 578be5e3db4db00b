use serde::{Deserialize, Serialize};

use crate::domain::errors::{GestureError, GestureResult};
use crate::domain::gesture::{LongPressOptions, PullToRefreshOptions};
use crate::domain::logging::LogLevel;

/// Host-supplied settings for the gesture layer.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    pub long_press: LongPressOptions,
    pub pull_to_refresh: PullToRefreshOptions,
    pub log_level: LogLevel,
}

impl GestureConfig {
    pub fn from_json(json: &str) -> GestureResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GestureError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GestureResult<()> {
        self.long_press.validate()?;
        self.pull_to_refresh.validate()
    }
}
