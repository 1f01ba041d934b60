use std::fmt;

/// Result of processing one URL in the crawl. Every URL produces exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was retrieved and decoded.
    Success(String),
    /// No request was made.
    Skipped(SkipReason),
    /// A single request was made and did not produce an html page.
    Failed(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NonTextExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonTextExtension => write!(f, "not a text resource (by extension)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    ContentTypeMismatch { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::ContentTypeMismatch { content_type } if content_type.is_empty() => {
                write!(f, "content type is not text/html (none declared)")
            }
            FailureKind::ContentTypeMismatch { content_type } => {
                write!(f, "content type is not text/html: {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
