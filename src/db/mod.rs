// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Data-access trait injected into handlers, plus its backends

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::errors::GalleryError;
use crate::models::{
    Album, AttachOutcome, DetachOutcome, Photo, UpdateAlbumRequest, UpdatePhotoRequest,
};
use async_trait::async_trait;

/// Document store for photos and albums
/// DOCUMENTATION: Handlers receive this as `web::Data<dyn Repository>`.
/// Attach/detach must be atomic in every implementation.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError>;

    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError>;

    /// Fetch every stored photo whose id is in `ids`, in no particular order
    async fn get_photos_by_ids(&self, ids: &[String]) -> Result<Vec<Photo>, GalleryError>;

    async fn insert_photo(&self, photo: &Photo) -> Result<Photo, GalleryError>;

    async fn update_photo(
        &self,
        id: &str,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, GalleryError>;

    /// Returns the removed document, or None if nothing matched
    async fn delete_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError>;

    async fn list_albums(&self) -> Result<Vec<Album>, GalleryError>;

    async fn get_album(&self, id: &str) -> Result<Option<Album>, GalleryError>;

    async fn insert_album(&self, album: &Album) -> Result<Album, GalleryError>;

    async fn update_album(
        &self,
        id: &str,
        req: &UpdateAlbumRequest,
    ) -> Result<Option<Album>, GalleryError>;

    async fn delete_album(&self, id: &str) -> Result<Option<Album>, GalleryError>;

    /// Append `photo_id` unless already present or the album is full
    async fn attach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<AttachOutcome, GalleryError>;

    /// Remove `photo_id` if present
    async fn detach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<DetachOutcome, GalleryError>;

    /// Release backend resources on shutdown
    async fn close(&self) {}
}
