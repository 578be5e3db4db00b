use derive_more::Display;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Severity, ordered so a sink can drop everything below its minimum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[default]
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer that produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: String) -> Self {
        Self { timestamp: get_time_provider().current_timestamp(), level, component, message }
    }
}

/// Wall clock used for log timestamps
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Sink for log entries. Level filtering is the sink's business.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn log(&self, entry: LogEntry) {
        (**self).log(entry)
    }
}

static GLOBAL_LOGGER: OnceCell<Box<dyn Logger>> = OnceCell::new();
static GLOBAL_TIME_PROVIDER: OnceCell<Box<dyn TimeProvider>> = OnceCell::new();

/// First install wins; later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

/// Stamps and forwards one line to the installed logger, if any.
pub fn emit(level: LogLevel, component: LogComponent, message: String) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.log(LogEntry::new(level, component, message));
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&CounterTimeProvider)
}

/// Fallback clock: a monotonic counter, so native builds never touch `js_sys`.
struct CounterTimeProvider;

impl TimeProvider for CounterTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

#[macro_export]
macro_rules! log_at {
    ($level:ident, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::$level,
            $component,
            format!($($arg)*),
        )
    };
}

/// Compiled out of release builds, like `log_debug!` and `log_info!`.
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!(Trace, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!(Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!(Info, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!(Warn, $component, $($arg)*);
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!(Error, $component, $($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert!(LogLevel::Debug < LogLevel::default());
    }

    #[test]
    fn component_display_carries_layer_prefix() {
        assert_eq!(LogComponent::Application("PullToRefresh").to_string(), "APP:PullToRefresh");
    }
}
