//! Aggregator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{endpoint} request failed with HTTP status {status}")]
    UpstreamFetch { endpoint: &'static str, status: u16 },

    #[error("{endpoint} unreachable: {reason}")]
    Transport {
        endpoint: &'static str,
        reason: String,
    },

    #[error("missing field in upstream response: {0}")]
    MissingField(&'static str),

    #[error("invalid {endpoint} response: {reason}")]
    InvalidResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("{0}")]
    Unknown(String),
}

/// Coarse classification surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upstream could not be reached or answered with a non-success status.
    UpstreamFetch,
    /// A successful response lacked a required field.
    MissingField,
    /// Anything else.
    Unknown,
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UpstreamFetch { .. } | Self::Transport { .. } => ErrorKind::UpstreamFetch,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::InvalidResponse { .. } | Self::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_collapse_variants() {
        let status = ScanError::UpstreamFetch {
            endpoint: "updates",
            status: 503,
        };
        assert_eq!(status.kind(), ErrorKind::UpstreamFetch);
        assert_eq!(
            status.to_string(),
            "updates request failed with HTTP status 503"
        );
        assert_eq!(
            ScanError::MissingField("updates").kind(),
            ErrorKind::MissingField
        );
        assert_eq!(ScanError::Unknown("boom".into()).kind(), ErrorKind::Unknown);
    }
}
