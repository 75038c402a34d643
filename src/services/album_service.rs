// src/services/album_service.rs
// DOCUMENTATION: Business logic for albums and their photo references
// PURPOSE: Expansion of photo ids and mapping of attach/detach outcomes

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{
    new_document_id, AddPhotoRequest, Album, AlbumResponse, AttachOutcome, CreateAlbumRequest,
    DetachOutcome, UpdateAlbumRequest, ALBUM_PHOTOS_MAX,
};
use validator::Validate;

pub struct AlbumService;

impl AlbumService {
    /// List all albums with photos expanded
    /// DOCUMENTATION: One lookup resolves the photo ids of every album
    pub async fn list_albums(repo: &dyn Repository) -> Result<Vec<AlbumResponse>, GalleryError> {
        let albums = repo.list_albums().await?;

        let mut ids: Vec<String> = albums.iter().flat_map(|a| a.photos.clone()).collect();
        ids.sort();
        ids.dedup();
        let photos = repo.get_photos_by_ids(&ids).await?;

        Ok(albums.into_iter().map(|a| a.expand(&photos)).collect())
    }

    pub async fn get_album(repo: &dyn Repository, id: &str) -> Result<AlbumResponse, GalleryError> {
        let album = repo
            .get_album(id)
            .await?
            .ok_or_else(GalleryError::album_not_found)?;
        let photos = repo.get_photos_by_ids(&album.photos).await?;
        Ok(album.expand(&photos))
    }

    pub async fn create_album(
        repo: &dyn Repository,
        req: CreateAlbumRequest,
    ) -> Result<Album, GalleryError> {
        if req.title.as_deref().map_or(true, str::is_empty) {
            return Err(GalleryError::InvalidInput("Title is required".to_string()));
        }
        req.validate()?;

        let album = repo
            .insert_album(&Album::from_request(new_document_id(), req))
            .await?;
        log::info!("Created album {}", album.id);
        Ok(album)
    }

    pub async fn update_album(
        repo: &dyn Repository,
        id: &str,
        req: UpdateAlbumRequest,
    ) -> Result<Album, GalleryError> {
        req.validate()?;

        let album = repo
            .update_album(id, &req)
            .await?
            .ok_or_else(GalleryError::album_not_found)?;
        log::debug!("Updated album {}", album.id);
        Ok(album)
    }

    /// Delete an album; the photos it referenced are untouched
    pub async fn delete_album(repo: &dyn Repository, id: &str) -> Result<String, GalleryError> {
        let album = repo
            .delete_album(id)
            .await?
            .ok_or_else(GalleryError::album_not_found)?;
        log::info!("Deleted album {}", album.id);
        Ok(album.id)
    }

    /// Attach a photo id to an album
    /// DOCUMENTATION: The check for duplicates and the append are one storage
    /// operation; the photo id itself is not required to exist
    pub async fn add_photo(
        repo: &dyn Repository,
        album_id: &str,
        req: AddPhotoRequest,
    ) -> Result<Album, GalleryError> {
        req.validate()?;
        let photo_id = match req.photo_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(GalleryError::InvalidInput(
                    "Photo id is required".to_string(),
                ))
            }
        };

        match repo.attach_photo(album_id, photo_id).await? {
            AttachOutcome::Attached(album) => {
                log::info!("Attached photo {} to album {}", photo_id, album_id);
                Ok(album)
            }
            AttachOutcome::AlreadyPresent => Err(GalleryError::InvalidInput(
                "Photo is already in this album".to_string(),
            )),
            AttachOutcome::AlbumFull => Err(GalleryError::InvalidInput(format!(
                "Album cannot hold more than {} photos",
                ALBUM_PHOTOS_MAX
            ))),
            AttachOutcome::AlbumMissing => Err(GalleryError::album_not_found()),
        }
    }

    pub async fn remove_photo(
        repo: &dyn Repository,
        album_id: &str,
        photo_id: &str,
    ) -> Result<Album, GalleryError> {
        match repo.detach_photo(album_id, photo_id).await? {
            DetachOutcome::Detached(album) => {
                log::info!("Detached photo {} from album {}", photo_id, album_id);
                Ok(album)
            }
            DetachOutcome::NotInAlbum => Err(GalleryError::NotFound(
                "Photo not found in this album".to_string(),
            )),
            DetachOutcome::AlbumMissing => Err(GalleryError::album_not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;
    use crate::models::CreatePhotoRequest;
    use crate::services::PhotoService;

    async fn trip(repo: &MemoryRepository) -> Album {
        AlbumService::create_album(
            repo,
            CreateAlbumRequest {
                title: Some("Trip".to_string()),
                description: None,
            },
        )
        .await
        .unwrap()
    }

    fn add(photo_id: &str) -> AddPhotoRequest {
        AddPhotoRequest {
            photo_id: Some(photo_id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_same_photo_twice() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;

        let updated = AlbumService::add_photo(&repo, &album.id, add("p1"))
            .await
            .unwrap();
        assert_eq!(updated.photos, vec!["p1".to_string()]);

        let err = AlbumService::add_photo(&repo, &album.id, add("p1"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::InvalidInput(_)));

        let stored = repo.get_album(&album.id).await.unwrap().unwrap();
        assert_eq!(stored.photos, vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_add_to_full_album_is_rejected() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;

        for i in 0..ALBUM_PHOTOS_MAX {
            AlbumService::add_photo(&repo, &album.id, add(&format!("p{}", i)))
                .await
                .unwrap();
        }

        let err = AlbumService::add_photo(&repo, &album.id, add("one-too-many"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::InvalidInput(_)));

        let stored = repo.get_album(&album.id).await.unwrap().unwrap();
        assert_eq!(stored.photos.len(), ALBUM_PHOTOS_MAX);
        assert!(!stored.photos.contains(&"one-too-many".to_string()));
    }

    #[tokio::test]
    async fn test_add_requires_photo_id() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;

        for req in [AddPhotoRequest { photo_id: None }, add("")] {
            let err = AlbumService::add_photo(&repo, &album.id, req)
                .await
                .unwrap_err();
            assert!(matches!(err, GalleryError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_add_to_missing_album() {
        let repo = MemoryRepository::new();
        let err = AlbumService::add_photo(&repo, "missing", add("p1"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_absent_photo_leaves_album_unchanged() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;
        AlbumService::add_photo(&repo, &album.id, add("p1"))
            .await
            .unwrap();

        let err = AlbumService::remove_photo(&repo, &album.id, "p2")
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(_)));

        let stored = repo.get_album(&album.id).await.unwrap().unwrap();
        assert_eq!(stored.photos, vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_get_album_expands_photos() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;
        let photo = PhotoService::create_photo(
            &repo,
            CreatePhotoRequest {
                title: Some("Beach".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        AlbumService::add_photo(&repo, &album.id, add(&photo.id))
            .await
            .unwrap();
        AlbumService::add_photo(&repo, &album.id, add("dangling"))
            .await
            .unwrap();

        let expanded = AlbumService::get_album(&repo, &album.id).await.unwrap();
        assert_eq!(expanded.photos.len(), 1);
        assert_eq!(expanded.photos[0].title, "Beach");

        let listed = AlbumService::list_albums(&repo).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].photos[0].id, photo.id);
    }

    #[tokio::test]
    async fn test_delete_missing_album_is_not_found() {
        let repo = MemoryRepository::new();
        let err = AlbumService::delete_album(&repo, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_description_only() {
        let repo = MemoryRepository::new();
        let album = trip(&repo).await;

        let updated = AlbumService::update_album(
            &repo,
            &album.id,
            UpdateAlbumRequest {
                title: None,
                description: Some(Some("Summer 2024".to_string())),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Trip");
        assert_eq!(updated.description.as_deref(), Some("Summer 2024"));
        assert_eq!(updated.photos, album.photos);
    }
}
