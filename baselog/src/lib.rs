//! # baselog
//! Process-wide severity-gated logging with a pluggable logger and aborter.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! baselog = "0.1.0"
//! ```
//!
//! ```rust
//! use baselog::{log, logging_config};
//!
//! logging_config()
//!     .with_args(std::env::args())
//!     .init();
//! log!(Info, "Hello, world!");
//! ```
//!
//! Records below the minimum severity are dropped; the minimum comes from
//! `ANDROID_LOG_TAGS` (`*:v`, `*:d`, `*:i`, `*:w`, `*:e`, `*:f`, `*:s`) and
//! defaults to `Info`. Multi-line messages reach the logger one line at a time,
//! all with the call site's file and line.
//!
//! ## Custom logger
//! Any `Fn(&LogLine)` is a logger. It runs under the dispatch lock and must not
//! log itself.
//!
//! ```rust
//! use baselog::{ChannelLogger, LogChannel, Severity, log, scoped_severity, set_logger};
//!
//! let (logger, lines) = ChannelLogger::new(LogChannel::Main);
//! set_logger(logger);
//! {
//!     let _verbose = scoped_severity(Severity::Verbose);
//!     log!(Debug, "step 1\nstep 2");
//! }
//! log!(Debug, "not shown");
//! let received: Vec<_> = lines.try_iter().map(|line| line.message).collect();
//! assert_eq!(received, vec!["step 1", "step 2"]);
//! ```
//!
//! ## Fatal records
//! `log!(Fatal, ...)` hands every line to the logger, then calls the aborter with
//! the whole message; the default aborter terminates the process.
//! `FatalWithoutAbort` is always emitted but never aborts.

mod bridge;
#[macro_use]
mod macros;

pub use baselog_core::{
    Aborter, ChannelLogger, DEFAULT_THRESHOLD, DefaultAborter, LogChannel, LogContext,
    LogEnvConfig, LogLine, LogMessage, LogTagsError, Logger, Receiver, Record, ScopedSeverity,
    Severity, StderrLogger, basename, error_description, format_line, parse_log_tag,
    parse_log_tags, split_lines, thread_id,
};
#[cfg(target_os = "linux")]
pub use baselog_core::{KMSG_BUFFER_SIZE, KernelLogger, format_kernel_line};
pub use bridge::install_log_bridge;

use std::sync::LazyLock;

/// Context shared by the whole process, built with the stderr logger and the
/// default aborter on first use.
static GLOBAL_CONTEXT: LazyLock<LogContext> = LazyLock::new(LogContext::default);

/// The process-wide context.
pub fn context() -> &'static LogContext {
    &GLOBAL_CONTEXT
}

/// Whether a record of `severity` would currently be emitted.
pub fn would_log(severity: Severity) -> bool {
    GLOBAL_CONTEXT.should_emit(severity)
}

pub fn minimum_severity() -> Severity {
    GLOBAL_CONTEXT.threshold()
}

/// Sets the minimum severity and returns the previous one.
pub fn set_minimum_severity(severity: Severity) -> Severity {
    GLOBAL_CONTEXT.set_threshold(severity)
}

/// Overrides the minimum severity until the returned guard is dropped.
pub fn scoped_severity(severity: Severity) -> ScopedSeverity<'static> {
    ScopedSeverity::new(&GLOBAL_CONTEXT, severity)
}

pub fn set_logger<L: Logger + 'static>(logger: L) {
    GLOBAL_CONTEXT.set_logger(logger);
}

pub fn set_aborter<A: Aborter + 'static>(aborter: A) {
    GLOBAL_CONTEXT.set_aborter(aborter);
}

/// Installs `logger` and `aborter`. The first call also takes the program name
/// from `argv0` and applies `ANDROID_LOG_TAGS`.
pub fn init_logging<L, A>(argv0: Option<&str>, logger: L, aborter: A)
where
    L: Logger + 'static,
    A: Aborter + 'static,
{
    GLOBAL_CONTEXT.init_from_env(argv0, logger, aborter);
}

enum TagsSource {
    Environment,
    Explicit(Option<String>),
}

/// Builder for configuring and initializing logging.
pub struct ConfigBuilder<L = StderrLogger, A = DefaultAborter> {
    argv0: Option<String>,
    log_tags: TagsSource,
    logger: L,
    aborter: A,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            argv0: None,
            log_tags: TagsSource::Environment,
            logger: StderrLogger::default(),
            aborter: DefaultAborter,
        }
    }
}

impl<L, A> ConfigBuilder<L, A>
where
    L: Logger + 'static,
    A: Aborter + 'static,
{
    /// Takes the program name from the first argument.
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            argv0: args.into_iter().next().map(|arg| arg.as_ref().to_owned()),
            ..self
        }
    }
    /// Sets the program name, reduced to its basename.
    pub fn with_program_name(self, name: &str) -> Self {
        Self {
            argv0: Some(name.into()),
            ..self
        }
    }
    /// Uses `tags` instead of `ANDROID_LOG_TAGS`.
    pub fn with_log_tags(self, tags: &str) -> Self {
        Self {
            log_tags: TagsSource::Explicit(Some(tags.into())),
            ..self
        }
    }
    /// Ignore `ANDROID_LOG_TAGS`.
    pub fn no_log_tags(self) -> Self {
        Self {
            log_tags: TagsSource::Explicit(None),
            ..self
        }
    }
    pub fn with_logger<L2: Logger + 'static>(self, logger: L2) -> ConfigBuilder<L2, A> {
        ConfigBuilder {
            argv0: self.argv0,
            log_tags: self.log_tags,
            logger,
            aborter: self.aborter,
        }
    }
    pub fn with_aborter<A2: Aborter + 'static>(self, aborter: A2) -> ConfigBuilder<L, A2> {
        ConfigBuilder {
            argv0: self.argv0,
            log_tags: self.log_tags,
            logger: self.logger,
            aborter,
        }
    }
    /// Initialize the process-wide context.
    pub fn init(self) {
        self.init_context(&GLOBAL_CONTEXT);
    }
    /// Initialize a caller-owned context.
    pub fn init_context(self, context: &LogContext) {
        let Self {
            argv0,
            log_tags,
            logger,
            aborter,
        } = self;
        match log_tags {
            TagsSource::Environment => context.init_from_env(argv0.as_deref(), logger, aborter),
            TagsSource::Explicit(tags) => {
                context.init(argv0.as_deref(), tags.as_deref(), logger, aborter)
            }
        }
    }
}

/// Returns a default ConfigBuilder: stderr logger, aborting aborter, tags from the environment.
pub fn logging_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
