use std::fmt;

use ring_core::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
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
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a single source could not contribute to the merge.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// What happened to one configured source during an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Merged,
    /// Declared format is unknown; the source was not fetched.
    Excluded,
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub location: String,
    pub status: SourceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub sources: Vec<SourceOutcome>,
}

impl AggregationReport {
    pub(crate) fn record(&mut self, location: &str, status: SourceStatus) {
        self.sources.push(SourceOutcome {
            location: location.to_string(),
            status,
        });
    }

    pub fn merged_count(&self) -> usize {
        self.count(|status| matches!(status, SourceStatus::Merged))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|status| matches!(status, SourceStatus::Skipped { .. }))
    }

    pub fn excluded_count(&self) -> usize {
        self.count(|status| matches!(status, SourceStatus::Excluded))
    }

    fn count(&self, predicate: impl Fn(&SourceStatus) -> bool) -> usize {
        self.sources
            .iter()
            .filter(|outcome| predicate(&outcome.status))
            .count()
    }
}
