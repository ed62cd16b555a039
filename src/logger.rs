//! Capturing logger.
//!
//! Forwards formatted log lines to a callback so the host can show them in
//! its own log panel, or on stderr for the command-line host.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that hands each formatted line to a callback
///
pub struct CaptureLogger {
    max_level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CaptureLogger {
    pub fn new(max_level: LevelFilter) -> Self {
        CaptureLogger {
            max_level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
        // A poisoned lock leaves the logger running without a sink
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install a capturing logger as the global logger.
///
pub fn init(max_level: LevelFilter, callback: LogCallback) -> Result<(), AppError> {
    let logger = CaptureLogger::new(max_level);
    logger.set_log_callback(callback);
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(max_level);
    Ok(())
}
