use std::fmt;

use crate::{
    context::LogContext,
    severity::{LogChannel, Severity},
};

/// One log event under construction. Dropping it emits it.
///
/// Text is accumulated through [`fmt::Write`] or [`Record::append`]. On drop the
/// severity is checked again, the OS error description is appended if an error
/// code was given, and the message is dispatched line by line. A `Fatal` record
/// does not return from drop.
///
/// ```
/// use std::fmt::Write;
/// use baselog_core::{ChannelLogger, DefaultAborter, LogChannel, LogContext, Record, Severity};
///
/// let (logger, lines) = ChannelLogger::new(LogChannel::Main);
/// let context = LogContext::new(logger, DefaultAborter);
/// {
///     let mut record = Record::new(&context, file!(), line!(), LogChannel::Default, Severity::Info, None);
///     write!(record, "{} files", 3).unwrap();
/// }
/// assert_eq!(lines.recv().unwrap().message, "3 files");
/// ```
pub struct Record<'a> {
    context: &'a LogContext,
    file: &'a str,
    line: u32,
    channel: LogChannel,
    severity: Severity,
    error: Option<i32>,
    buffer: String,
}

impl<'a> Record<'a> {
    pub fn new(
        context: &'a LogContext,
        file: &'a str,
        line: u32,
        channel: LogChannel,
        severity: Severity,
        error: Option<i32>,
    ) -> Self {
        Self {
            context,
            file: basename(file),
            line,
            channel,
            severity,
            error,
            buffer: String::new(),
        }
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    pub fn file(&self) -> &str {
        self.file
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Text accumulated so far, without the error suffix.
    pub fn text(&self) -> &str {
        &self.buffer
    }
}

impl fmt::Write for Record<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for Record<'_> {
    fn drop(&mut self) {
        // The macros already checked, but the threshold may have moved since.
        if !self.context.should_emit(self.severity) {
            return;
        }
        let mut message = std::mem::take(&mut self.buffer);
        if let Some(code) = self.error {
            message.push_str(": ");
            message.push_str(&error_description(code));
        }
        self.context
            .emit(self.file, self.line, self.channel, self.severity, &message);
    }
}

/// Human-readable text for an OS error code.
pub fn error_description(code: i32) -> String {
    let description = std::io::Error::from_raw_os_error(code).to_string();
    let suffix = format!(" (os error {code})");
    match description.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_owned(),
        None => description,
    }
}

/// Last path component of `path`.
pub fn basename(path: &str) -> &str {
    #[cfg(windows)]
    let separator = |c: char| c == '/' || c == '\\';
    #[cfg(not(windows))]
    let separator = |c: char| c == '/';
    match path.rfind(separator) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}
