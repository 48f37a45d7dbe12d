//! Colored, timestamped stderr logger shared by the CLI and the server

use chrono::Local;
use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", format_line(record.level(), record.target(), record.args()));
    }

    fn flush(&self) {}
}

fn level_label(level: Level) -> colored::ColoredString {
    match level {
        Level::Error => "Error".red().bold(),
        Level::Warn => "Warning".yellow(),
        Level::Info => "Info".blue(),
        Level::Debug => "Debug".dimmed(),
        Level::Trace => "Trace".dimmed(),
    }
}

fn format_line(level: Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!(
        "{} {}: {} {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_label(level),
        message,
        format!("({})", target).dimmed()
    )
}

/// Parse a level name such as `warn` or `debug`
pub fn parse_level(name: &str) -> anyhow::Result<LevelFilter> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown log level: {}", name))
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
