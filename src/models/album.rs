// src/models/album.rs
// DOCUMENTATION: Album documents and their request/response DTOs
// PURPOSE: `photos` holds the authoritative album -> photo association

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{deserialize_some, Photo};

pub const ALBUM_PHOTOS_MAX: usize = 100;

/// Album document as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Ordered photo identifiers, never duplicated
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Album with its photo references resolved to documents
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub photos: Vec<Photo>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new album
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateAlbumRequest {
    #[validate(required, length(min = 1, max = 20))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
}

/// Partial update for an album
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    #[validate(length(min = 1, max = 20))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<Option<String>>,
}

/// Body of POST /albums/{id}/photos
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AddPhotoRequest {
    #[serde(rename = "photoId")]
    #[validate(length(max = 64))]
    pub photo_id: Option<String>,
}

/// Result of an atomic attach at the storage layer
#[derive(Debug, Clone, PartialEq)]
pub enum AttachOutcome {
    Attached(Album),
    AlreadyPresent,
    AlbumFull,
    AlbumMissing,
}

/// Result of an atomic detach at the storage layer
#[derive(Debug, Clone, PartialEq)]
pub enum DetachOutcome {
    Detached(Album),
    NotInAlbum,
    AlbumMissing,
}

impl Album {
    pub fn from_request(id: String, req: CreateAlbumRequest) -> Self {
        Album {
            id,
            title: req.title.unwrap_or_default(),
            description: req.description,
            photos: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, req: &UpdateAlbumRequest) {
        if let Some(title) = &req.title {
            self.title = title.clone();
        }
        if let Some(description) = &req.description {
            self.description = description.clone();
        }
    }

    /// Replace photo ids with the matching documents, keeping album order.
    /// Ids without a stored photo are dropped.
    pub fn expand(self, photos: &[Photo]) -> AlbumResponse {
        let resolved = self
            .photos
            .iter()
            .filter_map(|id| photos.iter().find(|p| &p.id == id).cloned())
            .collect();

        AlbumResponse {
            id: self.id,
            title: self.title,
            description: self.description,
            photos: resolved,
            created_at: self.created_at,
        }
    }
}
