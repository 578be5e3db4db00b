pub mod long_press;
pub mod pull_to_refresh;
pub mod refresh;

pub use long_press::LongPressRecognizer;
pub use pull_to_refresh::PullToRefreshController;
