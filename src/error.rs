//! # Error Handling Module
//!
//! Two failure kinds exist: client input rejected before storage is touched,
//! and anything the storage layer reports. Not-found is never an error here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result type alias for people-api operations
pub type PeopleResult<T> = Result<T, PeopleError>;

#[derive(Error, Debug)]
pub enum PeopleError {
    /// Malformed or constraint-violating client input
    #[error("{0}")]
    Validation(String),

    /// Connectivity, constraint or statement failure reported by the database
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PeopleError {
    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PeopleError::Validation(_) => StatusCode::BAD_REQUEST,
            PeopleError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts PeopleError into an Axum HTTP response.
///
/// Storage details stay in the logs; clients only see a generic message.
impl IntoResponse for PeopleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            PeopleError::Validation(msg) => msg.clone(),
            PeopleError::Storage(detail) => {
                error!("Request failed in storage: {}", detail);
                "Internal Server Error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<rusqlite::Error> for PeopleError {
    fn from(err: rusqlite::Error) -> Self {
        PeopleError::Storage(err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for PeopleError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        PeopleError::Storage(err.to_string())
    }
}
