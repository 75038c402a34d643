// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::deserialize_some;

/// Photo document
/// DOCUMENTATION: Maps to the photos table; `albums` is a client-maintained
/// reference to at most one album and is never rewritten by album operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "album_id")]
    pub albums: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new photo
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub albums: Option<String>,
}

/// Partial update for a photo
/// DOCUMENTATION: Absent fields are left untouched; `null` clears an optional field
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(min = 1, max = 64))]
    pub albums: Option<Option<String>>,
}

impl Photo {
    /// Build a fresh document from a validated create request
    pub fn from_request(id: String, req: CreatePhotoRequest) -> Self {
        Photo {
            id,
            title: req.title.unwrap_or_default(),
            url: req.url,
            description: req.description,
            albums: req.albums,
            created_at: Utc::now(),
        }
    }

    /// Apply the fields present in a partial update
    pub fn apply(&mut self, req: &UpdatePhotoRequest) {
        if let Some(title) = &req.title {
            self.title = title.clone();
        }
        if let Some(url) = &req.url {
            self.url = url.clone();
        }
        if let Some(description) = &req.description {
            self.description = description.clone();
        }
        if let Some(albums) = &req.albums {
            self.albums = albums.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_title() {
        let req: CreatePhotoRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a.jpg"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreatePhotoRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreatePhotoRequest = serde_json::from_str(r#"{"title": "Beach"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_long_title() {
        let req = CreatePhotoRequest {
            title: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let req: UpdatePhotoRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert_eq!(req.url, None);
        assert_eq!(req.title, None);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut photo = Photo::from_request(
            "p1".to_string(),
            CreatePhotoRequest {
                title: Some("Beach".to_string()),
                url: Some("https://example.com/beach.jpg".to_string()),
                ..Default::default()
            },
        );
        let before = photo.clone();

        let req: UpdatePhotoRequest =
            serde_json::from_str(r#"{"description": "Sunset"}"#).unwrap();
        photo.apply(&req);

        assert_eq!(photo.description.as_deref(), Some("Sunset"));
        assert_eq!(photo.title, before.title);
        assert_eq!(photo.url, before.url);
        assert_eq!(photo.created_at, before.created_at);

        let req: UpdatePhotoRequest = serde_json::from_str(r#"{"url": null}"#).unwrap();
        photo.apply(&req);
        assert_eq!(photo.url, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let photo = Photo::from_request(
            "p1".to_string(),
            CreatePhotoRequest {
                title: Some("Beach".to_string()),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&photo).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["albums"], serde_json::Value::Null);
    }
}
