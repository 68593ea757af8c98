//! API error type and its JSON response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed query string or request body (400).
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("{resource} not found: {name}")]
    NotFound {
        resource: &'static str,
        name: String,
    },

    /// Failure inside the analysis pipeline; the status depends on the kind.
    #[error(transparent)]
    Analysis(#[from] polarity::Error),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Analysis(err) => match err {
                polarity::Error::Parse { .. } => StatusCode::BAD_REQUEST,
                polarity::Error::EmptyGraph | polarity::Error::Decomposition { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                polarity::Error::InvariantViolation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Analysis(err) => match err {
                polarity::Error::Parse { .. } => "PARSE_ERROR",
                polarity::Error::EmptyGraph => "EMPTY_GRAPH",
                polarity::Error::Decomposition { .. } => "DECOMPOSITION_ERROR",
                polarity::Error::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            },
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::InvalidName(name) => {
                Self::bad_request(format!("invalid dataset name: {name:?}"))
            }
            CatalogError::NotFound(name) => Self::NotFound {
                resource: "dataset",
                name,
            },
            CatalogError::Io(err) => Self::internal(format!("dataset catalog: {err}")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "API error");
        } else {
            tracing::warn!(error = %self, "API error");
        }

        let line = match &self {
            Self::Analysis(polarity::Error::Parse { line, .. }) => Some(*line),
            _ => None,
        };
        let body = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
            line,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
