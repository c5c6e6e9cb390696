use std::io::Write;

use chrono::Local;
use colored::{ColoredString, Colorize};
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::severity::{LogChannel, Severity};

/// One physical line handed to a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub channel: LogChannel,
    pub severity: Severity,
    /// Program invocation name.
    pub tag: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub message: &'a str,
}

/// Backend receiving dispatched lines.
///
/// Called with the dispatch lock held: an implementation must not log through
/// the same context, or it deadlocks.
pub trait Logger: Send + Sync {
    fn log(&self, line: &LogLine<'_>);
}

impl<F> Logger for F
where
    F: Fn(&LogLine<'_>) + Send + Sync,
{
    fn log(&self, line: &LogLine<'_>) {
        self(line)
    }
}

/// Owned copy of a [`LogLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub channel: LogChannel,
    pub severity: Severity,
    pub tag: String,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl From<&LogLine<'_>> for LogMessage {
    fn from(line: &LogLine<'_>) -> Self {
        Self {
            channel: line.channel,
            severity: line.severity,
            tag: line.tag.to_owned(),
            file: line.file.to_owned(),
            line: line.line,
            message: line.message.to_owned(),
        }
    }
}

/// Writes `<tag> <severity> <MM-DD HH:MM:SS> <pid> <tid> <file>:<line>] <message>` to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger {
    color: bool,
}

impl StderrLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colorize the severity character.
    pub fn with_color(self, yes: bool) -> Self {
        Self { color: yes }
    }
}

impl Logger for StderrLogger {
    fn log(&self, line: &LogLine<'_>) {
        let timestamp = Local::now().format("%m-%d %H:%M:%S").to_string();
        let formatted = format_line(line, &timestamp, std::process::id(), thread_id(), self.color);
        // Nowhere left to report a failed stderr write.
        writeln!(std::io::stderr().lock(), "{formatted}").ok();
    }
}

fn severity_marker(severity: Severity, color: bool) -> ColoredString {
    let marker = severity.as_char().to_string();
    if !color {
        return marker.normal();
    }
    match severity {
        Severity::Verbose => marker.purple(),
        Severity::Debug => marker.blue(),
        Severity::Info => marker.green(),
        Severity::Warning => marker.yellow(),
        Severity::Error => marker.red(),
        Severity::FatalWithoutAbort | Severity::Fatal => marker.red().bold(),
    }
}

/// Formats a line the way [`StderrLogger`] prints it, without the trailing newline.
pub fn format_line(line: &LogLine<'_>, timestamp: &str, pid: u32, tid: u64, color: bool) -> String {
    let LogLine {
        severity,
        tag,
        file,
        line: line_number,
        message,
        ..
    } = *line;
    let marker = severity_marker(severity, color);
    format!("{tag} {marker} {timestamp} {pid:>5} {tid:>5} {file}:{line_number}] {message}")
}

/// Kernel thread id of the caller.
#[cfg(target_os = "linux")]
pub fn thread_id() -> u64 {
    u64::from(nix::unistd::gettid().as_raw().unsigned_abs())
}

/// Process-unique id of the calling thread, assigned on first use.
#[cfg(not(target_os = "linux"))]
pub fn thread_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static ID: u64 = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    }
    ID.with(|id| *id)
}

/// Forwards every line as a [`LogMessage`] over a crossbeam channel.
///
/// `LogChannel::Default` is replaced with the logger's own default channel.
#[derive(Debug, Clone)]
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    default_channel: LogChannel,
}

impl ChannelLogger {
    pub fn new(default_channel: LogChannel) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        let logger = Self {
            sender,
            default_channel,
        };
        (logger, receiver)
    }
}

impl Logger for ChannelLogger {
    fn log(&self, line: &LogLine<'_>) {
        let mut message = LogMessage::from(line);
        if message.channel == LogChannel::Default {
            message.channel = self.default_channel;
        }
        // The receiver may be gone; the caller must not fail because of it.
        self.sender.send(message).ok();
    }
}
