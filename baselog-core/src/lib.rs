//! # baselog-core
//! Core of baselog - severity policy, logger registry and record dispatch.
//!
//! Everything hangs off an explicit [`LogContext`]; the `baselog` crate wraps a
//! process-wide instance of it.

mod aborter;
mod config;
mod context;
#[cfg(target_os = "linux")]
mod kernel;
mod lines;
mod logger;
mod record;
mod severity;
#[cfg(test)]
mod testing;

pub use aborter::{Aborter, DefaultAborter};
pub use config::{LogEnvConfig, LogTagsError, parse_log_tag, parse_log_tags};
pub use context::{DEFAULT_THRESHOLD, LogContext, ScopedSeverity, program_name};
#[cfg(target_os = "linux")]
pub use kernel::{KMSG_BUFFER_SIZE, KernelLogger, format_kernel_line};
pub use lines::split_lines;
pub use logger::{
    ChannelLogger, LogLine, LogMessage, Logger, StderrLogger, format_line, thread_id,
};
pub use record::{Record, basename, error_description};
pub use severity::{LogChannel, Severity};

pub use crossbeam_channel::Receiver;
