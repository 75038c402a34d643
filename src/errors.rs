// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every handler returns this enum; the single ResponseError
/// impl below is the only place where errors become HTTP responses
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Error envelope returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GalleryError {
    pub fn photo_not_found() -> Self {
        GalleryError::NotFound("Photo not found".to_string())
    }

    pub fn album_not_found() -> Self {
        GalleryError::NotFound("Album not found".to_string())
    }

    fn body(&self) -> ErrorBody {
        let code = self.status_code().as_u16();
        match self {
            GalleryError::NotFound(message) | GalleryError::InvalidInput(message) => ErrorBody {
                code,
                message: message.clone(),
                error: None,
            },
            GalleryError::ValidationError(details) => ErrorBody {
                code,
                message: "Validation failed".to_string(),
                error: Some(details.clone()),
            },
            GalleryError::DatabaseError(details) => ErrorBody {
                code,
                message: "Internal server error".to_string(),
                error: Some(details.clone()),
            },
        }
    }
}

impl From<validator::ValidationErrors> for GalleryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        GalleryError::ValidationError(errors.to_string())
    }
}

/// Convert GalleryError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON envelopes
impl ResponseError for GalleryError {
    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Request failed: {}", self);
        }

        HttpResponse::build(self.status_code()).json(self.body())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GalleryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GalleryError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
