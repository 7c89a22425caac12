//! Logger set-up shared by the demo binary and by applications embedding the crate.
//!
//! Library code only uses the `log` macros; installing a logger is left to the caller.
use chrono::Local;
use simplelog::*;
use std::error::Error;
use std::fs::File;

/// Maps the level names accepted in settings to a filter.
/// "off" and "none" switch logging off, anything unknown is `None`.
pub fn level_from_str(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// name of the log file for the current moment, e.g. log_2024-05-01_12-30-00.txt
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs a terminal logger and, if asked, a file logger next to it.
///
/// Returns `Ok(false)` when logging is off or when a global logger was already
/// installed, `Ok(true)` when this call installed it.
pub fn init_logger(loglevel: &str, log_to_file: bool) -> Result<bool, Box<dyn Error>> {
    let level = level_from_str(loglevel).ok_or_else(|| {
        format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            loglevel
        )
    })?;
    if level == LevelFilter::Off {
        return Ok(false);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let file = File::create(log_file_name())?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}
