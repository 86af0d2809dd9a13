use derive_more::Display;
use std::sync::{Arc, Mutex, OnceLock};

/// Severity, ordered from chattiest to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer and unit that produced a log entry, e.g. `APP:RenderController`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self { timestamp: get_time_provider().current_timestamp(), level, component, message: message.into() }
    }

    /// `[time] LEVEL LAYER:Unit | message`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {} | {}",
            get_time_provider().format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        )
    }
}

/// Clock abstraction so the domain never touches browser APIs directly.
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Log sink. Implementors only write entries; level filtering happens in
/// `emit` before an entry is built.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn min_level(&self) -> LogLevel {
        LogLevel::Trace
    }

    fn emit(&self, level: LogLevel, component: LogComponent, message: &str) {
        if level >= self.min_level() {
            self.log(LogEntry::new(level, component, message));
        }
    }

    fn trace(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Error, component, message);
    }
}

/// Keeps entries in memory. Clones share one buffer, so a clone can be
/// installed globally while the original is inspected.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    /// Whether an entry at `level` mentions `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries().iter().any(|e| e.level == level && e.message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide logger. Returns false if one was already installed.
pub fn init_logger(logger: Box<dyn Logger>) -> bool {
    GLOBAL_LOGGER.set(logger).is_ok()
}

/// Install the process-wide clock. Returns false if one was already installed.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) -> bool {
    GLOBAL_TIME_PROVIDER.set(time_provider).is_ok()
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&SilentLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER.get().map(|provider| provider.as_ref()).unwrap_or(&SequenceTimeProvider)
}

struct SilentLogger;

impl Logger for SilentLogger {
    fn log(&self, _entry: LogEntry) {}

    fn min_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Native fallback clock: a process-wide counter.
struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{:06}", timestamp)
    }
}

/// Formats and emits only when the installed logger accepts `level`.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $component:expr, $($arg:tt)*) => {{
        let logger = $crate::domain::logging::get_logger();
        if $level >= logger.min_level() {
            logger.emit($level, $component, &format!($($arg)*));
        }
    }};
}

/// Compiled out of release builds.
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!($crate::domain::logging::LogLevel::Trace, $component, $($arg)*);
        }
    };
}

/// Compiled out of release builds.
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!($crate::domain::logging::LogLevel::Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Error, $component, $($arg)*)
    };
}
