//! Leptos bindings and views.

pub mod hooks;
pub mod indicator;

pub use hooks::{
    BrowserLongPress, BrowserPullToRefresh, LongPressHandlers, PullToRefreshSignals, attach_pull_listeners,
    use_long_press, use_pull_to_refresh,
};
pub use indicator::{IndicatorIcon, IndicatorModel, PullToRefreshIndicator};
