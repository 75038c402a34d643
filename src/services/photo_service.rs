// src/services/photo_service.rs
// DOCUMENTATION: Business logic for photos
// PURPOSE: Intermediary between handlers and repository

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{new_document_id, CreatePhotoRequest, Photo, UpdatePhotoRequest};
use validator::Validate;

pub struct PhotoService;

impl PhotoService {
    pub async fn list_photos(repo: &dyn Repository) -> Result<Vec<Photo>, GalleryError> {
        repo.list_photos().await
    }

    pub async fn get_photo(repo: &dyn Repository, id: &str) -> Result<Photo, GalleryError> {
        repo.get_photo(id)
            .await?
            .ok_or_else(GalleryError::photo_not_found)
    }

    /// Create a new photo
    /// DOCUMENTATION: Nothing is written unless the request validates
    pub async fn create_photo(
        repo: &dyn Repository,
        req: CreatePhotoRequest,
    ) -> Result<Photo, GalleryError> {
        if req.title.as_deref().map_or(true, str::is_empty) {
            return Err(GalleryError::InvalidInput("Title is required".to_string()));
        }
        req.validate()?;

        let photo = repo
            .insert_photo(&Photo::from_request(new_document_id(), req))
            .await?;
        log::info!("Created photo {}", photo.id);
        Ok(photo)
    }

    /// Apply a partial update; validators run on the fields present
    pub async fn update_photo(
        repo: &dyn Repository,
        id: &str,
        req: UpdatePhotoRequest,
    ) -> Result<Photo, GalleryError> {
        req.validate()?;

        let photo = repo
            .update_photo(id, &req)
            .await?
            .ok_or_else(GalleryError::photo_not_found)?;
        log::debug!("Updated photo {}", photo.id);
        Ok(photo)
    }

    /// Delete a photo; album references to it are left in place
    pub async fn delete_photo(repo: &dyn Repository, id: &str) -> Result<String, GalleryError> {
        let photo = repo
            .delete_photo(id)
            .await?
            .ok_or_else(GalleryError::photo_not_found)?;
        log::info!("Deleted photo {}", photo.id);
        Ok(photo.id)
    }
}
