// src/logger.rs
// Console logging with colored levels and timestamps

use chrono::{DateTime, Local};
use colored::*;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Http,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogLevel::Http => write!(f, "{}", " HTTP ".on_blue().bold().white()),
            LogLevel::Info => write!(f, "{}", " INFO ".on_magenta().bold().white()),
            LogLevel::Warn => write!(f, "{}", " WARN ".on_yellow().bold().black()),
            LogLevel::Error => write!(f, "{}", " ERROR ".on_red().bold().white()),
        }
    }
}

/// Console logger for the startup, request and shutdown lines.
pub struct Logger {
    request_logging: bool,
    timestamps: bool,
}

impl Logger {
    pub const fn new(request_logging: bool, timestamps: bool) -> Self {
        Self {
            request_logging,
            timestamps,
        }
    }

    fn format_timestamp(&self) -> String {
        if self.timestamps {
            let now: DateTime<Local> = Local::now();
            format!("{} ", now.format("%Y-%m-%d %H:%M:%S").to_string().dimmed())
        } else {
            String::new()
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!("{}{} {}", self.format_timestamp(), level, message)
    }

    /// `ip METHOD path - status in N ms`, or nothing when access lines are off.
    fn format_access(
        &self,
        ip: &str,
        method: &str,
        path: &str,
        status: u16,
        elapsed_ms: u128,
    ) -> Option<String> {
        if !self.request_logging {
            return None;
        }

        let status = if status < 400 {
            status.to_string().green()
        } else {
            status.to_string().red()
        };
        let message = format!(
            "{} {} - {} in {} ms",
            ip.yellow(),
            format!("{} {}", method, path).cyan(),
            status,
            elapsed_ms
        );
        Some(self.format_line(LogLevel::Http, &message))
    }

    pub fn http(&self, ip: &str, method: &str, path: &str, status: u16, elapsed_ms: u128) {
        if let Some(line) = self.format_access(ip, method, path, status, elapsed_ms) {
            println!("{}", line);
        }
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.format_line(LogLevel::Info, message));
    }

    pub fn warn(&self, message: &str) {
        println!("{}", self.format_line(LogLevel::Warn, message));
    }

    pub fn error(&self, message: &str) {
        println!("{}", self.format_line(LogLevel::Error, message));
    }

    /// Startup banner with the address to share.
    pub fn server_info(&self, url: &str) {
        println!();
        println!("Starting Server...");
        println!("{}", url.bright_cyan());
    }

    pub fn shutdown_message(&self) {
        println!();
        println!("{}", "Server Stopped!".bold());
    }
}

// Used until the configuration has been merged, e.g. for config errors
static DEFAULT_LOGGER: Logger = Logger::new(true, true);
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process logger. Color is turned off when stdout is piped.
pub fn init_logger(request_logging: bool, timestamps: bool) {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    if GLOBAL_LOGGER
        .set(Logger::new(request_logging, timestamps))
        .is_err()
    {
        log::debug!("Logger already initialised");
    }
}

pub fn get_logger() -> &'static Logger {
    GLOBAL_LOGGER.get().unwrap_or(&DEFAULT_LOGGER)
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::get_logger().info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::get_logger().warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::get_logger().error(&format!($($arg)*))
    };
}
