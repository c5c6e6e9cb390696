/// Logs to the default channel: `log!(Warning, "low memory: {} kB", free)`.
///
/// Nothing is formatted when the severity is filtered out.
#[macro_export]
macro_rules! log {
    ($severity:ident, $($arg:tt)+) => {
        $crate::log_to!(Default, $severity, $($arg)+)
    };
}

/// Logs to a given channel: `log_to!(System, Error, "...")`.
#[macro_export]
macro_rules! log_to {
    ($channel:ident, $severity:ident, $($arg:tt)+) => {
        if $crate::would_log($crate::Severity::$severity) {
            let mut record = $crate::Record::new(
                $crate::context(),
                ::std::file!(),
                ::std::line!(),
                $crate::LogChannel::$channel,
                $crate::Severity::$severity,
                ::std::option::Option::None,
            );
            let _ = ::std::fmt::Write::write_fmt(&mut record, ::std::format_args!($($arg)+));
        }
    };
}

/// Like [`log!`], with the description of the last OS error appended.
#[macro_export]
macro_rules! plog {
    ($severity:ident, $($arg:tt)+) => {
        $crate::plog_to!(Default, $severity, $($arg)+)
    };
}

/// Like [`log_to!`], with the description of the last OS error appended.
#[macro_export]
macro_rules! plog_to {
    ($channel:ident, $severity:ident, $($arg:tt)+) => {
        if $crate::would_log($crate::Severity::$severity) {
            // Taken before formatting can clobber it.
            let error = ::std::io::Error::last_os_error().raw_os_error();
            let mut record = $crate::Record::new(
                $crate::context(),
                ::std::file!(),
                ::std::line!(),
                $crate::LogChannel::$channel,
                $crate::Severity::$severity,
                error,
            );
            let _ = ::std::fmt::Write::write_fmt(&mut record, ::std::format_args!($($arg)+));
        }
    };
}
