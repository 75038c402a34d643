// src/db/memory.rs
// DOCUMENTATION: In-process document store
// PURPOSE: STORAGE_BACKEND=memory for local runs, and the backend for HTTP tests

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{
    Album, AttachOutcome, DetachOutcome, Photo, UpdateAlbumRequest, UpdatePhotoRequest,
    ALBUM_PHOTOS_MAX,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    // Vecs keep insertion order, which is also creation order
    photos: Vec<Photo>,
    albums: Vec<Album>,
}

/// Thread-safe store; every mutation happens under one write lock,
/// so attach/detach cannot interleave with another writer
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_id(kind: &str, id: &str) -> GalleryError {
    GalleryError::DatabaseError(format!("duplicate {} id: {}", kind, id))
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError> {
        Ok(self.store.read().await.photos.clone())
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError> {
        let store = self.store.read().await;
        Ok(store.photos.iter().find(|p| p.id == id).cloned())
    }

    async fn get_photos_by_ids(&self, ids: &[String]) -> Result<Vec<Photo>, GalleryError> {
        let store = self.store.read().await;
        Ok(store
            .photos
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_photo(&self, photo: &Photo) -> Result<Photo, GalleryError> {
        let mut store = self.store.write().await;
        if store.photos.iter().any(|p| p.id == photo.id) {
            return Err(duplicate_id("photo", &photo.id));
        }
        store.photos.push(photo.clone());
        Ok(photo.clone())
    }

    async fn update_photo(
        &self,
        id: &str,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, GalleryError> {
        let mut store = self.store.write().await;
        Ok(store.photos.iter_mut().find(|p| p.id == id).map(|photo| {
            photo.apply(req);
            photo.clone()
        }))
    }

    async fn delete_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError> {
        let mut store = self.store.write().await;
        Ok(store
            .photos
            .iter()
            .position(|p| p.id == id)
            .map(|index| store.photos.remove(index)))
    }

    async fn list_albums(&self) -> Result<Vec<Album>, GalleryError> {
        Ok(self.store.read().await.albums.clone())
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>, GalleryError> {
        let store = self.store.read().await;
        Ok(store.albums.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_album(&self, album: &Album) -> Result<Album, GalleryError> {
        let mut store = self.store.write().await;
        if store.albums.iter().any(|a| a.id == album.id) {
            return Err(duplicate_id("album", &album.id));
        }
        store.albums.push(album.clone());
        Ok(album.clone())
    }

    async fn update_album(
        &self,
        id: &str,
        req: &UpdateAlbumRequest,
    ) -> Result<Option<Album>, GalleryError> {
        let mut store = self.store.write().await;
        Ok(store.albums.iter_mut().find(|a| a.id == id).map(|album| {
            album.apply(req);
            album.clone()
        }))
    }

    async fn delete_album(&self, id: &str) -> Result<Option<Album>, GalleryError> {
        let mut store = self.store.write().await;
        Ok(store
            .albums
            .iter()
            .position(|a| a.id == id)
            .map(|index| store.albums.remove(index)))
    }

    async fn attach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<AttachOutcome, GalleryError> {
        let mut store = self.store.write().await;
        let Some(album) = store.albums.iter_mut().find(|a| a.id == album_id) else {
            return Ok(AttachOutcome::AlbumMissing);
        };

        if album.photos.iter().any(|p| p == photo_id) {
            return Ok(AttachOutcome::AlreadyPresent);
        }
        if album.photos.len() >= ALBUM_PHOTOS_MAX {
            return Ok(AttachOutcome::AlbumFull);
        }

        album.photos.push(photo_id.to_string());
        Ok(AttachOutcome::Attached(album.clone()))
    }

    async fn detach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<DetachOutcome, GalleryError> {
        let mut store = self.store.write().await;
        let Some(album) = store.albums.iter_mut().find(|a| a.id == album_id) else {
            return Ok(DetachOutcome::AlbumMissing);
        };

        match album.photos.iter().position(|p| p == photo_id) {
            Some(index) => {
                album.photos.remove(index);
                Ok(DetachOutcome::Detached(album.clone()))
            }
            None => Ok(DetachOutcome::NotInAlbum),
        }
    }
}
