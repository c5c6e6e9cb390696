use std::{
    fs::OpenOptions,
    io::Write,
    sync::{Mutex, PoisonError},
};

use crate::{
    logger::{LogLine, Logger},
    severity::Severity,
};

/// Size of the kernel's printk buffer.
pub const KMSG_BUFFER_SIZE: usize = 1024;

const KMSG_PATH: &str = "/dev/kmsg";

/// Formats `<level>tag: message\n`, bounded by [`KMSG_BUFFER_SIZE`].
///
/// An oversized line is replaced by a notice giving its size.
pub fn format_kernel_line(severity: Severity, tag: &str, message: &str) -> Vec<u8> {
    let level = severity.kernel_level();
    let line = format!("<{level}>{tag}: {message}\n");
    if line.len() <= KMSG_BUFFER_SIZE {
        return line.into_bytes();
    }
    let mut notice =
        format!("<{level}>{tag}: {}-byte message too long for printk\n", line.len()).into_bytes();
    notice.truncate(KMSG_BUFFER_SIZE);
    notice
}

/// Writes each line to the kernel log. File and line number are not recorded.
pub struct KernelLogger {
    device: Option<Mutex<Box<dyn Write + Send>>>,
}

impl KernelLogger {
    /// Opens `/dev/kmsg`. Without access to it the logger drops everything.
    pub fn open() -> Self {
        let device = OpenOptions::new().write(true).open(KMSG_PATH).ok();
        Self {
            device: device.map(|file| Mutex::new(Box::new(file) as Box<dyn Write + Send>)),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            device: Some(Mutex::new(Box::new(writer))),
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }
}

impl Logger for KernelLogger {
    fn log(&self, line: &LogLine<'_>) {
        let Some(device) = &self.device else {
            return;
        };
        let bytes = format_kernel_line(line.severity, line.tag, line.message);
        let mut device = device.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = device.write_all(&bytes);
    }
}
