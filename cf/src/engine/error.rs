//! Agent engine error types

use std::time::Duration;
use thiserror::Error;

/// Errors from the agent execution collaborator
///
/// Every variant is scoped to a single invocation; none is fatal to the
/// session. Callers retry the turn or stage that failed.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether retrying the same invocation could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::RateLimited { .. } => true,
            EngineError::Api { status, .. } => *status >= 500,
            EngineError::Network(_) => true,
            EngineError::Timeout(_) => true,
            EngineError::InvalidResponse(_) => false,
            EngineError::Prompt(_) => false,
            EngineError::Config(_) => false,
            EngineError::Json(_) => false,
        }
    }

    /// Retry delay when the provider supplied one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            EngineError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(
            EngineError::RateLimited {
                retry_after: Duration::from_secs(60)
            }
            .is_retryable()
        );

        assert!(
            EngineError::Api {
                status: 503,
                message: "overloaded".to_string()
            }
            .is_retryable()
        );

        assert!(
            !EngineError::Api {
                status: 400,
                message: "bad request".to_string()
            }
            .is_retryable()
        );

        assert!(EngineError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(!EngineError::InvalidResponse("bad payload".to_string()).is_retryable());
        assert!(!EngineError::Prompt("missing key".to_string()).is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let err = EngineError::RateLimited {
            retry_after: Duration::from_secs(42),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(42)));

        let err = EngineError::Api {
            status: 500,
            message: "server error".to_string(),
        };
        assert_eq!(err.retry_after(), None);
    }
}
