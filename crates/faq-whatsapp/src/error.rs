//! Error types for faq-whatsapp

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// faq-whatsapp error type
#[derive(Error, Debug)]
pub enum WhatsAppError {
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Corrupt session record: {0}")]
    CorruptSession(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<redis::RedisError> for WhatsAppError {
    fn from(err: redis::RedisError) -> Self {
        WhatsAppError::StoreUnavailable(err.to_string())
    }
}

impl From<faq_core::Error> for WhatsAppError {
    fn from(err: faq_core::Error) -> Self {
        WhatsAppError::Config(err.to_string())
    }
}

impl WhatsAppError {
    /// HTTP status the webhook answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WhatsAppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            WhatsAppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            WhatsAppError::CorruptSession(_)
            | WhatsAppError::Http(_)
            | WhatsAppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for WhatsAppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WhatsAppError>;
