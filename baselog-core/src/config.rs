use derive_from_env::FromEnv;
use thiserror::Error;

use crate::severity::Severity;

/// Environment overrides read at initialization.
#[derive(FromEnv)]
#[from_env(prefix = "ANDROID_LOG")]
#[allow(non_snake_case)]
pub struct LogEnvConfig {
    /// Space-separated `*:<level>` tokens.
    pub TAGS: Option<String>,
}

impl LogEnvConfig {
    /// The `ANDROID_LOG_TAGS` string, `None` when unset.
    pub fn tags() -> Result<Option<String>, LogTagsError> {
        Self::from_env()
            .map(|config| config.TAGS)
            .map_err(|err| LogTagsError::Unreadable(format!("{err:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogTagsError {
    #[error("unsupported '{token}' in ANDROID_LOG_TAGS ({tags})")]
    Unsupported { token: String, tags: String },
    #[error("unreadable ANDROID_LOG_TAGS: {0}")]
    Unreadable(String),
}

/// Parses one `*:<level>` token.
///
/// `s` ("silent") maps to `FatalWithoutAbort`: fatal records can never be suppressed.
pub fn parse_log_tag(token: &str) -> Option<Severity> {
    let level = token.strip_prefix("*:")?;
    let mut chars = level.chars();
    let severity = match (chars.next()?, chars.next()) {
        ('v', None) => Severity::Verbose,
        ('d', None) => Severity::Debug,
        ('i', None) => Severity::Info,
        ('w', None) => Severity::Warning,
        ('e', None) => Severity::Error,
        ('f' | 's', None) => Severity::FatalWithoutAbort,
        _ => return None,
    };
    Some(severity)
}

/// Parses a whole tags string split on single spaces. The last token wins.
///
/// Every segment must be a valid token, so an empty string, a leading, trailing
/// or doubled space all fail the parse.
pub fn parse_log_tags(tags: &str) -> Result<Severity, LogTagsError> {
    let mut threshold = None;
    for token in tags.split(' ') {
        match parse_log_tag(token) {
            Some(severity) => threshold = Some(severity),
            None => {
                return Err(LogTagsError::Unsupported {
                    token: token.to_owned(),
                    tags: tags.to_owned(),
                });
            }
        }
    }
    threshold.ok_or_else(|| LogTagsError::Unsupported {
        token: String::new(),
        tags: tags.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_level_letter() {
        let cases = [
            ("*:v", Severity::Verbose),
            ("*:d", Severity::Debug),
            ("*:i", Severity::Info),
            ("*:w", Severity::Warning),
            ("*:e", Severity::Error),
            ("*:f", Severity::FatalWithoutAbort),
            ("*:s", Severity::FatalWithoutAbort),
        ];
        for (token, severity) in cases {
            assert_eq!(parse_log_tag(token), Some(severity), "{token}");
        }
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for token in ["*:q", "foo:w", "*:", "*:ww", "*:W", "*w", ":w", "**:w", "*:é"] {
            assert_eq!(parse_log_tag(token), None, "{token}");
        }
    }

    #[test]
    fn test_last_token_wins() {
        assert_eq!(parse_log_tags("*:v *:e"), Ok(Severity::Error));
        assert_eq!(parse_log_tags("*:e *:i *:d"), Ok(Severity::Debug));
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        for tags in ["", " ", "*:w  *:e", " *:w", "*:w ", "*:w\t*:e"] {
            let err = parse_log_tags(tags).unwrap_err();
            assert!(
                matches!(&err, LogTagsError::Unsupported { tags: whole, .. } if whole == tags),
                "{tags:?}: {err:?}"
            );
        }
        assert_eq!(
            parse_log_tags("*:w  *:e").unwrap_err().to_string(),
            "unsupported '' in ANDROID_LOG_TAGS (*:w  *:e)"
        );
    }

    #[test]
    fn test_bad_token_error_names_token_and_string() {
        let err = parse_log_tags("*:w foo:w").unwrap_err();
        assert_eq!(
            err,
            LogTagsError::Unsupported {
                token: "foo:w".into(),
                tags: "*:w foo:w".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "unsupported 'foo:w' in ANDROID_LOG_TAGS (*:w foo:w)"
        );
    }
}
