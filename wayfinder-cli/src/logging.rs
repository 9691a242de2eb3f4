//! Logging setup for the binary.
//!
//! Logs go to stderr so that stdout carries nothing but JSON.

use std::io::{self, Write};

use env_logger::{Builder, Env, Target, WriteStyle};
use log::Level;

/// Install a compact stderr logger filtered by `RUST_LOG`, defaulting to
/// `warn`.
///
/// # Errors
///
/// Fails when a global logger is already installed.
pub fn init_logger() -> io::Result<()> {
    let env = Env::default().default_filter_or("warn");
    Builder::from_env(env)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
