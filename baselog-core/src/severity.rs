use std::fmt;

/// Severity of a log record, from least to most severe.
///
/// Both fatal tiers are always emitted whatever the threshold. Only
/// [`Severity::Fatal`] terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Verbose = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    FatalWithoutAbort = 5,
    Fatal = 6,
}

impl Severity {
    /// Every severity, in ascending order.
    pub const ALL: [Severity; 7] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::FatalWithoutAbort,
        Severity::Fatal,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Single character used by the stderr line format.
    pub fn as_char(self) -> char {
        match self {
            Severity::Verbose => 'V',
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Warning => 'W',
            Severity::Error => 'E',
            Severity::FatalWithoutAbort | Severity::Fatal => 'F',
        }
    }

    pub fn is_fatal(self) -> bool {
        matches!(self, Severity::FatalWithoutAbort | Severity::Fatal)
    }

    /// Whether a record of this severity ends in the aborter.
    pub fn aborts(self) -> bool {
        self == Severity::Fatal
    }

    /// printk priority. The kernel has no verbose level, so it shares KERN_DEBUG.
    pub fn kernel_level(self) -> u8 {
        match self {
            Severity::Verbose | Severity::Debug => 7,
            Severity::Info => 6,
            Severity::Warning => 4,
            Severity::Error => 3,
            Severity::FatalWithoutAbort | Severity::Fatal => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Verbose => "VERBOSE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::FatalWithoutAbort => "FATAL_WITHOUT_ABORT",
            Severity::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// Logical output channel of a record.
///
/// `Default` is left to the active logger to resolve when the line is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogChannel {
    #[default]
    Default,
    Main,
    System,
}
