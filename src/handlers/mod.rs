// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export route configuration and shared request plumbing

pub mod albums;
pub mod health;
pub mod photos;

pub use albums::config as albums_config;
pub use health::config as health_config;
pub use photos::config as photos_config;

use crate::errors::{ErrorBody, GalleryError};
use actix_web::{web, HttpResponse};

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        code: 404,
        message: "Not Found".to_string(),
        error: None,
    })
}

/// JSON extractor settings: malformed bodies use the same error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            GalleryError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
        })
}
