//! Console Logger
//!
//! `log` backend for the browser. Each record becomes one console line:
//!
//! ```text
//! [12:00:01.250] WARN  Catalog catalog_sync::sync: [FAV] Add of item 42 failed: ...
//! ```
//!
//! Errors and warnings go to `console.error` / `console.warn` so the browser
//! highlights them. Outside wasm the same lines go to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger {
    app_name: &'static str,
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        let line = format_line(
            &timestamp,
            record.level(),
            self.app_name,
            record.target(),
            &record.args().to_string(),
        );
        write_line(record.level(), &line);
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already installed.
pub fn init_logger(app_name: &'static str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = Box::new(ConsoleLogger { app_name, level });
    log::set_logger(Box::leak(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// Render one log line
pub fn format_line(timestamp: &str, level: Level, app_name: &str, target: &str, message: &str) -> String {
    format!("[{}] {:<5} {} {}: {}", timestamp, level, app_name, target, message)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug => web_sys::console::log_1(&value),
        Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line("12:00:01.250", Level::Warn, "Catalog", "catalog_sync::sync", "boom");
        assert_eq!(line, "[12:00:01.250] WARN  Catalog catalog_sync::sync: boom");
    }

    #[test]
    fn test_format_line_pads_level() {
        let line = format_line("t", Level::Info, "App", "target", "msg");
        assert!(line.starts_with("[t] INFO  App"));
        let line = format_line("t", Level::Error, "App", "target", "msg");
        assert!(line.starts_with("[t] ERROR App"));
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger {
            app_name: "App",
            level: LevelFilter::Info,
        };
        let info = Metadata::builder().level(Level::Info).target("t").build();
        let debug = Metadata::builder().level(Level::Debug).target("t").build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
