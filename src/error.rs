//! Error types for the contacts service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Contact Error Enum ==
/// Unified error type for the contacts service.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Malformed id, body, or missing required fields
    #[error("{0}")]
    InvalidRequest(String),

    /// No contact with the given id
    #[error("no contact with id {0}")]
    NotFound(i64),

    /// Backend or database failure
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Database was written by a newer build
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: i64,
        latest_supported: i64,
    },
}

impl ContactError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ContactError::NotFound(_) => StatusCode::NOT_FOUND,
            ContactError::Persistence(_) | ContactError::UnsupportedSchemaVersion { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the contacts service.
pub type Result<T> = std::result::Result<T, ContactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ContactError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ContactError::NotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ContactError::Persistence(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ContactError::NotFound(42).to_string(), "no contact with id 42");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ContactError::InvalidRequest("error parsing id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "error parsing id");
    }
}
