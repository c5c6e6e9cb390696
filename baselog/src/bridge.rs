use std::fmt::Write;

use ::log::{Level, LevelFilter, Log, Metadata, SetLoggerError};

use crate::{LogChannel, Record, Severity, context, would_log};

/// Routes records of the `log` crate facade through the process-wide context.
struct LogBridge;

static LOG_BRIDGE: LogBridge = LogBridge;

fn severity_for(level: Level) -> Severity {
    match level {
        Level::Trace => Severity::Verbose,
        Level::Debug => Severity::Debug,
        Level::Info => Severity::Info,
        Level::Warn => Severity::Warning,
        Level::Error => Severity::Error,
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        would_log(severity_for(metadata.level()))
    }

    fn log(&self, record: &::log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut entry = Record::new(
            context(),
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            LogChannel::Default,
            severity_for(record.level()),
            None,
        );
        let _ = entry.write_fmt(*record.args());
    }

    fn flush(&self) {}
}

/// Makes `log::info!` and friends go through baselog. Filtering stays with the
/// minimum severity, so the `log` max level is opened fully.
pub fn install_log_bridge() -> Result<(), SetLoggerError> {
    ::log::set_logger(&LOG_BRIDGE)?;
    ::log::set_max_level(LevelFilter::Trace);
    Ok(())
}
