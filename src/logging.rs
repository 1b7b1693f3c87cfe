//! Logger setup for the binary.
//!
//! Stdout carries the status feed, so warnings and errors go to stderr
//! with a severity prefix.

use env_logger::{Builder, Env, Target};
use log::Level;
use std::{fmt, io::Write};

pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub fn goes_to_stderr(level: Level) -> bool {
    level <= Level::Warn
}

/// Format one record as a single output line
pub fn render(level: Level, args: &fmt::Arguments) -> String {
    match level {
        Level::Error => format!("error: {args}"),
        Level::Warn => format!("warning: {args}"),
        _ => args.to_string(),
    }
}

pub fn init() {
    log_panics::init();

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter()));

    builder.format(|f, record| {
        let line = render(record.level(), record.args());
        if goes_to_stderr(record.level()) {
            writeln!(std::io::stderr().lock(), "{line}")
        } else {
            writeln!(f, "{line}")
        }
    });

    builder.target(Target::Stdout).init();
}
