use std::sync::Mutex;

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Console logger for the browser, backed by `gloo::console`
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn format_log_entry(entry: &LogEntry) -> String {
        format!(
            "[{}] {} {} | {}",
            get_time_provider().format_timestamp(entry.timestamp),
            entry.level,
            entry.component,
            entry.message
        )
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = Self::format_log_entry(&entry);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => gloo::console::debug!(formatted.as_str()),
            LogLevel::Info => gloo::console::info!(formatted.as_str()),
            LogLevel::Warn => gloo::console::warn!(formatted.as_str()),
            LogLevel::Error => gloo::console::error!(formatted.as_str()),
        }
    }
}

/// Wall clock from `Date.now()`
#[derive(Debug, Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Keeps the most recent formatted lines in memory for tests.
#[derive(Default)]
pub struct MemoryLogger {
    min_level: LogLevel,
    lines: Mutex<Vec<String>>,
    capacity: usize,
}

impl MemoryLogger {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level, lines: Mutex::new(Vec::new()), capacity: Self::DEFAULT_CAPACITY }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let line = format!("{} {}: {}", entry.level, entry.component, entry.message);
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
            let capacity = if self.capacity == 0 { Self::DEFAULT_CAPACITY } else { self.capacity };
            let overflow = lines.len().saturating_sub(capacity);
            lines.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::LogComponent;

    #[test]
    fn memory_logger_filters_and_caps() {
        let logger = MemoryLogger::new(LogLevel::Info).with_capacity(2);
        let log = |level, message: &str| {
            logger.log(LogEntry::new(level, LogComponent::Application("Test"), message.to_string()))
        };
        log(LogLevel::Debug, "dropped");
        log(LogLevel::Info, "one");
        log(LogLevel::Warn, "two");
        log(LogLevel::Error, "three");

        assert_eq!(logger.lines(), vec![" WARN APP:Test: two", "ERROR APP:Test: three"]);
    }
}
