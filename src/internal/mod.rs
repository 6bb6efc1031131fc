//! The crate's own status logger, used to report pool re-entrancy, argument failures and
//! config loading.
//!
//! Initialized once through a `OnceLock`; calls made before initialization are dropped.
//! Lines are formatted through the immutable message path, never the pool, so a status line
//! emitted while a pooled holder is checked out cannot disturb it.

use crate::arg::Arg;
use crate::config::Config;
use crate::fmt::{Field, LayoutValues, StatusLayout};
use crate::level::Level;
use crate::message::{Message, RenderedMessage};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};

static STATUS_LOGGER: OnceLock<StatusLogger> = OnceLock::new();

type Sink = Box<dyn Write + Send>;

struct StatusLogger {
    level: Level,
    scopes: HashMap<String, Level>,
    layout: StatusLayout,
    timestamp_format: String,
    sink: Mutex<Sink>,
}

impl StatusLogger {
    fn from_config(config: &Config, sink: Sink) -> Self {
        Self {
            level: config.parse_level(),
            scopes: config.parse_scope_levels(),
            layout: StatusLayout::parse(&config.status.structure),
            timestamp_format: config.status.timestamp_format.clone(),
            sink: Mutex::new(sink),
        }
    }

    fn threshold(&self, scope: &str) -> Level {
        self.scopes.get(scope).copied().unwrap_or(self.level)
    }

    fn enabled(&self, level: Level, scope: &str) -> bool {
        level != Level::Off && level >= self.threshold(scope)
    }

    fn write_line(&self, level: Level, scope: &str, msg: &str) {
        let timestamp = if self.layout.uses(Field::Timestamp) {
            let mut ts = String::new();
            // An invalid strftime pattern leaves the timestamp empty.
            if write!(ts, "{}", chrono::Local::now().format(&self.timestamp_format)).is_err() {
                ts.clear();
            }
            ts
        } else {
            String::new()
        };

        let mut line = self.layout.render(&LayoutValues {
            timestamp: &timestamp,
            level: level.label(),
            scope,
            msg,
        });
        line.push('\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        // Status output must never fail the caller.
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }
}

/// Loads the default config itself, falling back to defaults on any error.
///
/// Only the first initializer takes effect.
pub fn init() {
    let was_init = STATUS_LOGGER.get().is_some();
    STATUS_LOGGER.get_or_init(|| {
        let config = Config::load().unwrap_or_default();
        StatusLogger::from_config(&config, Box::new(io::stderr()))
    });
    if !was_init {
        debug("INTERNAL", "Status logger ready");
    }
}

/// Reuses an already-loaded config.
pub fn init_with_config(config: &Config) {
    init_with_sink(config, Box::new(io::stderr()));
}

/// Sends status lines to `writer` at `level` and above, with the default layout.
pub fn init_with_writer(level: Level, writer: impl Write + Send + 'static) {
    let mut config = Config::default();
    config.status.level = level.as_str().to_string();
    init_with_sink(&config, Box::new(writer));
}

/// Like [`init_with_config`] with a custom sink.
pub fn init_with_config_and_writer(config: &Config, writer: impl Write + Send + 'static) {
    init_with_sink(config, Box::new(writer));
}

fn init_with_sink(config: &Config, sink: Sink) {
    let was_init = STATUS_LOGGER.get().is_some();
    STATUS_LOGGER.get_or_init(|| StatusLogger::from_config(config, sink));
    if !was_init {
        log_args(
            Level::Debug,
            "INTERNAL",
            "Status level: {}, scope overrides: {}",
            &crate::args![&config.status.level, config.status.scopes.len()],
        );
    }
}

/// Whether a line at `level` in `scope` would be written.
#[must_use]
pub fn enabled(level: Level, scope: &str) -> bool {
    STATUS_LOGGER
        .get()
        .is_some_and(|logger| logger.enabled(level, scope))
}

/// Formats `template` with `args` only when the line would be written.
///
/// An unused trailing error argument is appended after the message.
pub fn log_args(level: Level, scope: &str, template: &str, args: &[Arg]) {
    let Some(logger) = STATUS_LOGGER.get() else {
        return;
    };
    if !logger.enabled(level, scope) {
        return;
    }
    let message = RenderedMessage::new(template, args);
    match message.error() {
        Some(error) => {
            let text = format!("{}: {error}", message.formatted_message());
            logger.write_line(level, scope, &text);
        }
        None => logger.write_line(level, scope, message.formatted_message()),
    }
}

fn log(level: Level, scope: &str, msg: &str) {
    if let Some(logger) = STATUS_LOGGER.get()
        && logger.enabled(level, scope)
    {
        logger.write_line(level, scope, msg);
    }
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
