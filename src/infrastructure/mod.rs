//! Browser adapters for the gesture ports, plus logging sinks.

pub mod haptics;
pub mod scheduler;
pub mod scroll;
pub mod services;

pub use haptics::{NavigatorHaptics, NoHaptics, RecordingHaptics};
pub use scheduler::{BrowserScheduler, ManualScheduler, ManualTimer};
pub use scroll::element_scroll_top;
pub use services::{BrowserTimeProvider, ConsoleLogger, MemoryLogger};
