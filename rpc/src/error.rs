//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feeburn_aggregator::{ErrorKind, ScanError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("config error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Scan(e) => match e.kind() {
                ErrorKind::UpstreamFetch | ErrorKind::MissingField => StatusCode::BAD_GATEWAY,
                ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Config(_) | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<std::io::Error> for RpcError {
    fn from(e: std::io::Error) -> Self {
        RpcError::Server(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_and_missing_field_are_bad_gateway() {
        let upstream = RpcError::from(ScanError::UpstreamFetch {
            endpoint: "updates",
            status: 503,
        });
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            RpcError::from(ScanError::MissingField("updates")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RpcError::from(ScanError::Unknown("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn scan_errors_keep_their_message() {
        let err = RpcError::from(ScanError::MissingField("updates"));
        assert_eq!(err.to_string(), "missing field in upstream response: updates");
    }
}
