use crate::{ServerError, ServerErrorResult};

use ms_config::{Config, LoggingConfig};

use std::fmt::{Arguments, Display};
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize the process-wide logger from the `[logging]` section.
///
/// Output goes to `<config dir>/<logging.dir>/<logging.file>` when a file is
/// configured, otherwise to stdout (colored when `logging.colored` is set).
pub fn initialize(logging: &LoggingConfig) -> ServerErrorResult<()> {
    let level_filter = *logging.level;
    let log_file = log_file_path(logging)?;

    let output = match &log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ServerError::Logger {
                    message: format!("Failed to open log file {}: {}", path.display(), e),
                })?;

            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, &record.level()))
                .chain(file)
        }
        None if logging.colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, &colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, &record.level()))
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match &log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

/// Resolve the configured log file, creating its directory.
fn log_file_path(logging: &LoggingConfig) -> ServerErrorResult<Option<PathBuf>> {
    let Some(filename) = &logging.file else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Logger {
        message: format!("Failed to create log directory {}: {}", log_dir.display(), e),
    })?;

    Ok(Some(log_dir.join(filename)))
}

fn write_line(out: FormatCallback<'_>, message: &Arguments<'_>, record: &Record<'_>, level: &dyn Display) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        level = level,
        message = message,
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
