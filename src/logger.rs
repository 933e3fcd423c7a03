//! Logging for RateBot
//!
//! Colored console output plus a plain-text copy appended to
//! `logs/ratebot.log`. Debug messages only appear when the process was
//! started with `--debug`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ratebot::logger::{self, LogTag};
//!
//! logger::info(LogTag::Price, "Price cache ready");
//! logger::error(LogTag::Telegram, "Failed to send reply");
//! logger::debug(LogTag::Webserver, "Health check endpoint called");
//! ```

use chrono::Utc;
use colored::{ColoredString, Colorize};
use once_cell::sync::OnceCell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

/// Subsystem tag attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Price,
    Telegram,
    Webserver,
}

impl LogTag {
    fn label(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Price => "PRICE",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Webserver => "WEB",
        }
    }

    fn colored_label(&self) -> ColoredString {
        match self {
            LogTag::System => self.label().blue().bold(),
            LogTag::Config => self.label().green().bold(),
            LogTag::Price => self.label().cyan().bold(),
            LogTag::Telegram => self.label().magenta().bold(),
            LogTag::Webserver => self.label().bright_green().bold(),
        }
    }
}

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Log file handle, opened once in init()
static LOG_FILE: OnceCell<Mutex<File>> = OnceCell::new();

/// Initialize the logger system
///
/// Call once at application startup, before any logging occurs.
/// File logging is best effort - console output works regardless.
pub fn init() {
    if std::fs::create_dir_all("logs").is_ok() {
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open("logs/ratebot.log")
        {
            let _ = LOG_FILE.set(Mutex::new(file));
        }
    }
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (only shown with --debug)
pub fn debug(tag: LogTag, message: &str) {
    if crate::arguments::is_debug_enabled() {
        log_internal(tag, LogLevel::Debug, message);
    }
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
    let stamp = format!("[{}]", timestamp).dimmed();

    match level {
        LogLevel::Error => println!(
            "{} {} {} {}",
            "❌".red().bold(),
            tag.colored_label(),
            stamp,
            message.red()
        ),
        LogLevel::Warning => println!(
            "{} {} {} {}",
            "⚠".yellow().bold(),
            tag.colored_label(),
            stamp,
            message.yellow()
        ),
        LogLevel::Info => println!(
            "{} {} {} {}",
            "ℹ".blue().bold(),
            tag.colored_label(),
            stamp,
            message
        ),
        LogLevel::Debug => println!(
            "{} {} {} {}",
            "🐛".purple().bold(),
            tag.colored_label(),
            stamp,
            message.dimmed()
        ),
    }

    if let Some(file) = LOG_FILE.get() {
        if let Ok(mut f) = file.lock() {
            let _ = writeln!(
                f,
                "[{}] [{}] [{}] {}",
                timestamp,
                level.name(),
                tag.label(),
                message
            );
        }
    }
}
