//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its mapping onto
//! the uniform `{ success: false, error: { code, message, details? } }` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use itinerary_core::{PipelineError, PortError};
use tracing::error;

use crate::config::ConfigError;
use crate::web::response::ErrorEnvelope;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A failed trip generation, carrying the pipeline's own taxonomy.
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// The trip store could not complete a read, write or delete.
    #[error("Trip store error: {0}")]
    Store(PortError),

    /// The places autocomplete service failed.
    #[error("Places service error: {0}")]
    Places(PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or parameters could not be understood.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The caller is identified but may not touch the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status, stable error code and caller-facing message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Pipeline(PipelineError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.message.clone())
            }
            ApiError::Pipeline(e @ PipelineError::Generation(PortError::Timeout(_))) => (
                StatusCode::GATEWAY_TIMEOUT,
                e.code(),
                "The itinerary service took too long to respond. Please try again later."
                    .to_string(),
            ),
            ApiError::Pipeline(e @ PipelineError::Generation(_)) => (
                StatusCode::BAD_GATEWAY,
                e.code(),
                "The itinerary service is unavailable. Please try again later.".to_string(),
            ),
            ApiError::Pipeline(
                e @ (PipelineError::MalformedOutput { .. } | PipelineError::SchemaViolation { .. }),
            ) => (
                StatusCode::BAD_GATEWAY,
                e.code(),
                "The generated itinerary was incomplete. Please try again.".to_string(),
            ),
            ApiError::Pipeline(e @ PipelineError::Store(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.code(),
                "The trip was generated but could not be saved. Please try again.".to_string(),
            ),
            ApiError::Store(PortError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Trip not found".to_string(),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND", message.clone()),
            ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "Failed to access the trip store.".to_string(),
            ),
            ApiError::Places(PortError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "PLACES_ERROR",
                "The places service took too long to respond.".to_string(),
            ),
            ApiError::Places(_) => (
                StatusCode::BAD_GATEWAY,
                "PLACES_ERROR",
                "The places service is unavailable.".to_string(),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "A valid bearer token is required.".to_string(),
            ),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, "FORBIDDEN", message.clone()),
            ApiError::Config(_)
            | ApiError::Database(_)
            | ApiError::Io(_)
            | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred. Please try again.".to_string(),
            ),
        }
    }

    /// Renders the error envelope. Internal error text goes into `details` only
    /// when `expose_details` is set.
    pub fn into_response_with(self, expose_details: bool) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            error!("Request failed with {}: {:?}", status, self);
        }
        let details = expose_details.then(|| self.to_string());
        (status, Json(ErrorEnvelope::new(code, message, details))).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

/// An [`ApiError`] bound to the service's detail-exposure setting.
#[derive(Debug)]
pub struct HttpError {
    pub error: ApiError,
    pub expose_details: bool,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.error.into_response_with(self.expose_details)
    }
}
