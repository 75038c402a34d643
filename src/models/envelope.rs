// src/models/envelope.rs
// DOCUMENTATION: Success envelopes for non-document responses

use serde::Serialize;

/// `{code, message, data}` returned by album photo attach/detach
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

/// `{code, message, id}` returned after a delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub code: u16,
    pub message: String,
    pub id: String,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        MessageResponse {
            code: 200,
            message: message.to_string(),
            data,
        }
    }
}

impl DeletedResponse {
    pub fn ok(message: &str, id: String) -> Self {
        DeletedResponse {
            code: 200,
            message: message.to_string(),
            id,
        }
    }
}
