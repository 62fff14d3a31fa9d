//! Enrichment errors.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use common::AppError;

/// Which of the three demographic lookups a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Age,
    Gender,
    Nationality,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lookup::Age => "age",
            Lookup::Gender => "gender",
            Lookup::Nationality => "nationality",
        };
        f.write_str(name)
    }
}

/// Failure of a demographic enrichment. Any variant discards the whole record.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("{lookup} lookup failed: {message}")]
    Transport { lookup: Lookup, message: String },

    #[error("{lookup} lookup returned HTTP {status}")]
    Status { lookup: Lookup, status: u16 },

    #[error("{lookup} lookup returned an unreadable body: {message}")]
    Decode { lookup: Lookup, message: String },

    #[error("{lookup} lookup returned no prediction")]
    NoPrediction { lookup: Lookup },

    #[error("{lookup} lookup task failed: {message}")]
    Task { lookup: Lookup, message: String },

    #[error("demographic lookups did not finish within {0:?}")]
    Timeout(Duration),
}

impl EnrichmentError {
    /// The lookup that failed, if the failure is attributable to one.
    pub fn lookup(&self) -> Option<Lookup> {
        match self {
            EnrichmentError::Transport { lookup, .. }
            | EnrichmentError::Status { lookup, .. }
            | EnrichmentError::Decode { lookup, .. }
            | EnrichmentError::NoPrediction { lookup }
            | EnrichmentError::Task { lookup, .. } => Some(*lookup),
            EnrichmentError::Timeout(_) => None,
        }
    }
}

impl From<EnrichmentError> for AppError {
    fn from(err: EnrichmentError) -> Self {
        AppError::upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_the_failed_lookup() {
        let err = EnrichmentError::Status {
            lookup: Lookup::Gender,
            status: 429,
        };
        assert_eq!(err.to_string(), "gender lookup returned HTTP 429");
        assert_eq!(err.lookup(), Some(Lookup::Gender));
    }

    #[test]
    fn test_timeout_has_no_single_lookup() {
        let err = EnrichmentError::Timeout(Duration::from_millis(3000));
        assert_eq!(err.lookup(), None);
    }

    #[test]
    fn test_converts_to_upstream() {
        let err: AppError = EnrichmentError::NoPrediction {
            lookup: Lookup::Age,
        }
        .into();
        assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("age")));
    }
}
