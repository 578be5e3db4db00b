use wasm_bindgen::prelude::*;

use crate::domain::logging::LogLevel;

pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;

#[cfg(not(feature = "logic-only"))]
pub mod app;
#[cfg(not(feature = "logic-only"))]
pub mod presentation;

pub use config::GestureConfig;

/// Panic hook and time provider; logging is installed by the host or the demo.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));
}

/// Route gesture logs to the browser console. Only the first call takes effect.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    let level = level.and_then(|level| level.parse::<LogLevel>().ok()).unwrap_or_default();
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(level)));
}

/// Mount the ETF watchlist demo on `<body>`.
///
/// `config_json` is a [`GestureConfig`] in camelCase JSON; omitted keys take
/// their defaults.
#[cfg(not(feature = "logic-only"))]
#[wasm_bindgen(js_name = mountDemo)]
pub fn mount_demo(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => GestureConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GestureConfig::default(),
    };
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));
    crate::log_at!(
        Info,
        domain::logging::LogComponent::Presentation("Initialize"),
        "mounting demo (threshold {}px, long press {}ms)",
        config.pull_to_refresh.threshold,
        config.long_press.delay_ms
    );

    app::mount(config);
    Ok(())
}
