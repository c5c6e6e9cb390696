use std::{
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex},
};

use crossbeam_channel::Receiver;

use crate::{
    aborter::Aborter,
    context::LogContext,
    logger::{ChannelLogger, LogMessage},
    severity::LogChannel,
};

/// Records every abort, then panics instead of terminating.
#[derive(Clone, Default)]
pub struct RecordingAborter {
    messages: Arc<Mutex<Vec<String>>>,
    pending_lines: Arc<Mutex<Vec<usize>>>,
    lines: Option<Receiver<LogMessage>>,
}

impl RecordingAborter {
    /// Also notes how many captured lines were already queued at abort time.
    pub fn watching(lines: Receiver<LogMessage>) -> Self {
        Self {
            lines: Some(lines),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn pending_lines(&self) -> Vec<usize> {
        self.pending_lines.lock().unwrap().clone()
    }

    pub fn catch<F: FnOnce()>(f: F) -> std::thread::Result<()> {
        panic::catch_unwind(AssertUnwindSafe(f))
    }
}

impl Aborter for RecordingAborter {
    fn abort(&self, message: &str) -> ! {
        if let Some(lines) = &self.lines {
            self.pending_lines.lock().unwrap().push(lines.len());
        }
        self.messages.lock().unwrap().push(message.to_owned());
        panic!("aborted: {message}");
    }
}

/// A context capturing lines on a channel, with a [`RecordingAborter`].
pub fn capture_context() -> (LogContext, Receiver<LogMessage>, RecordingAborter) {
    let (logger, lines) = ChannelLogger::new(LogChannel::Main);
    let aborter = RecordingAborter::watching(lines.clone());
    let context = LogContext::new(logger, aborter.clone()).with_tag("test");
    (context, lines, aborter)
}
