//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("ATS error: {0}")]
    Ats(String),

    #[error("Resume fetch failed: {0}")]
    ResumeFetch(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),

    /// Rate limit signalled by the scoring service. `retry_after_secs` is the
    /// server hint (Retry-After header) when one was sent.
    #[error("Rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid scoring criteria: {0}")]
    InvalidCriteria(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl DomainError {
    /// Transient failures worth another attempt after a backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DomainError::RateLimited {
            retry_after_secs: None
        }
        .is_retryable());
        assert!(DomainError::Timeout("llm".into()).is_retryable());
        assert!(!DomainError::Scoring("bad json".into()).is_retryable());
        assert!(!DomainError::Ats("401".into()).is_retryable());
    }
}
