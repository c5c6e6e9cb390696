use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU8, Ordering},
};

use crate::{
    aborter::{Aborter, DefaultAborter},
    config::{LogEnvConfig, LogTagsError, parse_log_tags},
    lines::split_lines,
    logger::{LogLine, Logger, StderrLogger},
    record::{Record, basename},
    severity::{LogChannel, Severity},
};

/// Threshold used until something else is configured.
pub const DEFAULT_THRESHOLD: Severity = Severity::Info;

/// State guarded by the dispatch lock.
struct Registry {
    logger: Arc<dyn Logger>,
    aborter: Arc<dyn Aborter>,
    tag: String,
    initialized: bool,
}

/// Minimum severity, active logger and aborter, and program name of one logging domain.
///
/// A single lock serializes logger/aborter swaps, threshold writes and the whole
/// line-by-line dispatch of a record, so lines of concurrent records never
/// interleave and a record never sees half of a swap. The threshold is read
/// without the lock.
pub struct LogContext {
    threshold: AtomicU8,
    registry: Mutex<Registry>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(StderrLogger::default(), DefaultAborter)
    }
}

impl LogContext {
    pub fn new<L, A>(logger: L, aborter: A) -> Self
    where
        L: Logger + 'static,
        A: Aborter + 'static,
    {
        Self {
            threshold: AtomicU8::new(DEFAULT_THRESHOLD as u8),
            registry: Mutex::new(Registry {
                logger: Arc::new(logger),
                aborter: Arc::new(aborter),
                tag: program_name(),
                initialized: false,
            }),
        }
    }

    /// Sets the tag passed to the logger with every line.
    pub fn with_tag(self, tag: &str) -> Self {
        self.lock().tag = tag.to_owned();
        self
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // A logger that panicked leaves the registry intact.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Installs a new threshold and returns the previous one.
    pub fn set_threshold(&self, severity: Severity) -> Severity {
        let _registry = self.lock();
        self.store_threshold(severity)
    }

    /// Caller holds the registry lock.
    fn store_threshold(&self, severity: Severity) -> Severity {
        let previous = self.threshold.swap(severity as u8, Ordering::Relaxed);
        Severity::from_u8(previous).unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Whether a record of `severity` would reach the logger.
    pub fn should_emit(&self, severity: Severity) -> bool {
        severity.is_fatal() || severity >= self.threshold()
    }

    pub fn set_logger<L: Logger + 'static>(&self, logger: L) {
        self.lock().logger = Arc::new(logger);
    }

    pub fn set_aborter<A: Aborter + 'static>(&self, aborter: A) {
        self.lock().aborter = Arc::new(aborter);
    }

    pub fn tag(&self) -> String {
        self.lock().tag.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Swaps in `logger` and `aborter`. The first call also stashes the program
    /// name from `argv0` and applies `log_tags`.
    ///
    /// An unsupported token in `log_tags` is reported as a `Fatal` record, which aborts.
    pub fn init<L, A>(&self, argv0: Option<&str>, log_tags: Option<&str>, logger: L, aborter: A)
    where
        L: Logger + 'static,
        A: Aborter + 'static,
    {
        self.configure(argv0, Ok(log_tags), Arc::new(logger), Arc::new(aborter));
    }

    /// Like [`LogContext::init`], with the tags read from `ANDROID_LOG_TAGS`.
    ///
    /// A variable that cannot be read is reported like an unsupported token.
    pub fn init_from_env<L, A>(&self, argv0: Option<&str>, logger: L, aborter: A)
    where
        L: Logger + 'static,
        A: Aborter + 'static,
    {
        let log_tags = LogEnvConfig::tags();
        self.configure(
            argv0,
            log_tags.as_ref().map(Option::as_deref).map_err(Clone::clone),
            Arc::new(logger),
            Arc::new(aborter),
        );
    }

    fn configure(
        &self,
        argv0: Option<&str>,
        log_tags: Result<Option<&str>, LogTagsError>,
        logger: Arc<dyn Logger>,
        aborter: Arc<dyn Aborter>,
    ) {
        let error = {
            // Held until the first initialization is complete, so a concurrent
            // init never returns before the name and threshold are in place.
            let mut registry = self.lock();
            registry.logger = logger;
            registry.aborter = aborter;
            if registry.initialized {
                return;
            }
            registry.initialized = true;

            if let Some(argv0) = argv0 {
                registry.tag = basename(argv0).to_owned();
            }
            match log_tags.and_then(|tags| tags.map(parse_log_tags).transpose()) {
                Ok(Some(threshold)) => {
                    self.store_threshold(threshold);
                    None
                }
                Ok(None) => None,
                Err(err) => Some(err),
            }
        };
        if let Some(err) = error {
            let mut record = Record::new(
                self,
                file!(),
                line!(),
                LogChannel::Default,
                Severity::Fatal,
                None,
            );
            record.append(&err.to_string());
        }
    }

    /// Hands `message` to the logger one line at a time, under the lock, then
    /// aborts if `severity` is `Fatal`.
    ///
    /// The threshold is not consulted; [`Record`] does that.
    pub fn emit(
        &self,
        file: &str,
        line: u32,
        channel: LogChannel,
        severity: Severity,
        message: &str,
    ) {
        let aborter = {
            let registry = self.lock();
            for text in split_lines(message) {
                registry.logger.log(&LogLine {
                    channel,
                    severity,
                    tag: &registry.tag,
                    file,
                    line,
                    message: text,
                });
            }
            severity.aborts().then(|| Arc::clone(&registry.aborter))
        };
        if let Some(aborter) = aborter {
            aborter.abort(message);
        }
    }
}

/// Restores the previous threshold when dropped. Nested guards unwind in stack order.
#[must_use = "the threshold is restored as soon as the guard is dropped"]
pub struct ScopedSeverity<'a> {
    context: &'a LogContext,
    previous: Severity,
}

impl<'a> ScopedSeverity<'a> {
    pub fn new(context: &'a LogContext, severity: Severity) -> Self {
        let previous = context.set_threshold(severity);
        Self { context, previous }
    }
}

impl Drop for ScopedSeverity<'_> {
    fn drop(&mut self) {
        self.context.set_threshold(self.previous);
    }
}

/// Basename of the first process argument.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|argv0| basename(&argv0.to_string_lossy()).to_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "<unknown>".into())
}
