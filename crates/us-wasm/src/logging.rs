//! `log` backend writing to the browser console.

use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;
static INSTALLED: OnceLock<()> = OnceLock::new();

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling again only changes the level.
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);
    log::set_max_level(filter);
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    log::set_logger(&LOGGER)?;
    let _ = INSTALLED.set(());
    Ok(())
}
