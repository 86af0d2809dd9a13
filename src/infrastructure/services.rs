use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Logger writing to the browser console.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Debug and up in debug builds, warnings and errors otherwise.
    pub fn for_build() -> Self {
        Self::new(if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Warn })
    }
}

impl Logger for ConsoleLogger {
    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn log(&self, entry: LogEntry) {
        let line = wasm_bindgen::JsValue::from_str(&entry.format_line());
        match entry.level {
            LogLevel::Error => web_sys::console::error_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Debug | LogLevel::Trace => web_sys::console::debug_1(&line),
        }
    }
}

/// Wall clock from `Date.now()`.
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
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp as f64));
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_utc_hours(),
            date.get_utc_minutes(),
            date.get_utc_seconds(),
            date.get_utc_milliseconds()
        )
    }
}
