//! Leveled status reporting for pipeline runs.
//!
//! Pipeline stages report progress through these helpers rather than
//! printing directly, so every run produces the same readable trace:
//! info lines for stage starts, success lines for completed steps,
//! warnings for dropped rows.

/// Log level for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Print this entry to stdout with its level prefix.
    pub fn print(&self) {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        println!("{}{} {}", indent, prefix, self.message);
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LogEntry::info(msg).print();
}

pub fn log_success(msg: impl Into<String>) {
    LogEntry::success(msg).print();
}

pub fn log_warning(msg: impl Into<String>) {
    LogEntry::warning(msg).print();
}

pub fn log_error(msg: impl Into<String>) {
    LogEntry::error(msg).print();
}
