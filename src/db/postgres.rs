// src/db/postgres.rs
// DOCUMENTATION: PostgreSQL-backed document store
// PURPOSE: All SQL for photos and albums lives here

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{
    Album, AttachOutcome, DetachOutcome, Photo, UpdateAlbumRequest, UpdatePhotoRequest,
    ALBUM_PHOTOS_MAX,
};
use async_trait::async_trait;
use sqlx::PgPool;

const PHOTO_COLUMNS: &str = "id, title, url, description, album_id, created_at";
const ALBUM_COLUMNS: &str = "id, title, description, photos, created_at";

/// Tables are created on startup; each statement runs separately because
/// prepared statements cannot carry more than one command
const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS photos (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        url         TEXT,
        description TEXT,
        album_id    TEXT,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS albums (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT,
        photos      TEXT[] NOT NULL DEFAULT '{}',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// PgRepository: Repository implementation over a shared connection pool
pub struct PgRepository {
    pool: PgPool,
}

/// Re-runs of the guarded attach when a concurrent write invalidates the rejection
const ATTACH_ATTEMPTS: usize = 3;

/// Why a guarded attach matched no row, judged from the album's current photos.
/// None when neither guard holds any more and the update should be retried.
fn rejected_attach(photos: Option<&[String]>, photo_id: &str) -> Option<AttachOutcome> {
    match photos {
        None => Some(AttachOutcome::AlbumMissing),
        Some(photos) if photos.iter().any(|p| p == photo_id) => {
            Some(AttachOutcome::AlreadyPresent)
        }
        Some(photos) if photos.len() >= ALBUM_PHOTOS_MAX => Some(AttachOutcome::AlbumFull),
        Some(_) => None,
    }
}

fn db_error(action: &str, e: sqlx::Error) -> GalleryError {
    log::error!("Failed to {}: {}", action, e);
    GalleryError::DatabaseError(format!("{} failed: {}", action, e))
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the photos and albums tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), GalleryError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("create schema", e))?;
        }
        log::info!("Database schema ready");
        Ok(())
    }

    async fn album_photos(&self, album_id: &str) -> Result<Option<Vec<String>>, GalleryError> {
        let row: Option<(Vec<String>,)> =
            sqlx::query_as("SELECT photos FROM albums WHERE id = $1")
                .bind(album_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("load album photos", e))?;

        Ok(row.map(|(photos,)| photos))
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM photos ORDER BY created_at ASC, id ASC",
            PHOTO_COLUMNS
        );
        sqlx::query_as::<_, Photo>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list photos", e))
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError> {
        let sql = format!("SELECT {} FROM photos WHERE id = $1", PHOTO_COLUMNS);
        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch photo", e))
    }

    async fn get_photos_by_ids(&self, ids: &[String]) -> Result<Vec<Photo>, GalleryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM photos WHERE id = ANY($1)", PHOTO_COLUMNS);
        sqlx::query_as::<_, Photo>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch photos by id", e))
    }

    async fn insert_photo(&self, photo: &Photo) -> Result<Photo, GalleryError> {
        let sql = format!(
            r#"
            INSERT INTO photos (id, title, url, description, album_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(&photo.id)
            .bind(&photo.title)
            .bind(&photo.url)
            .bind(&photo.description)
            .bind(&photo.albums)
            .bind(photo.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("create photo", e))
    }

    async fn update_photo(
        &self,
        id: &str,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, GalleryError> {
        // For nullable columns the flag says whether the field was sent at all
        let sql = format!(
            r#"
            UPDATE photos SET
                title       = COALESCE($2, title),
                url         = CASE WHEN $3 THEN $4::text ELSE url END,
                description = CASE WHEN $5 THEN $6::text ELSE description END,
                album_id    = CASE WHEN $7 THEN $8::text ELSE album_id END
            WHERE id = $1
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(req.url.is_some())
            .bind(req.url.clone().flatten())
            .bind(req.description.is_some())
            .bind(req.description.clone().flatten())
            .bind(req.albums.is_some())
            .bind(req.albums.clone().flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update photo", e))
    }

    async fn delete_photo(&self, id: &str) -> Result<Option<Photo>, GalleryError> {
        let sql = format!("DELETE FROM photos WHERE id = $1 RETURNING {}", PHOTO_COLUMNS);
        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("delete photo", e))
    }

    async fn list_albums(&self) -> Result<Vec<Album>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM albums ORDER BY created_at ASC, id ASC",
            ALBUM_COLUMNS
        );
        sqlx::query_as::<_, Album>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list albums", e))
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>, GalleryError> {
        let sql = format!("SELECT {} FROM albums WHERE id = $1", ALBUM_COLUMNS);
        sqlx::query_as::<_, Album>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch album", e))
    }

    async fn insert_album(&self, album: &Album) -> Result<Album, GalleryError> {
        let sql = format!(
            r#"
            INSERT INTO albums (id, title, description, photos, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ALBUM_COLUMNS
        );
        sqlx::query_as::<_, Album>(&sql)
            .bind(&album.id)
            .bind(&album.title)
            .bind(&album.description)
            .bind(&album.photos)
            .bind(album.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("create album", e))
    }

    async fn update_album(
        &self,
        id: &str,
        req: &UpdateAlbumRequest,
    ) -> Result<Option<Album>, GalleryError> {
        let sql = format!(
            r#"
            UPDATE albums SET
                title       = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4::text ELSE description END
            WHERE id = $1
            RETURNING {}
            "#,
            ALBUM_COLUMNS
        );
        sqlx::query_as::<_, Album>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(req.description.is_some())
            .bind(req.description.clone().flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update album", e))
    }

    async fn delete_album(&self, id: &str) -> Result<Option<Album>, GalleryError> {
        let sql = format!("DELETE FROM albums WHERE id = $1 RETURNING {}", ALBUM_COLUMNS);
        sqlx::query_as::<_, Album>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("delete album", e))
    }

    async fn attach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<AttachOutcome, GalleryError> {
        let sql = format!(
            r#"
            UPDATE albums SET photos = array_append(photos, $2::text)
            WHERE id = $1
              AND NOT ($2::text = ANY(photos))
              AND cardinality(photos) < $3
            RETURNING {}
            "#,
            ALBUM_COLUMNS
        );

        for _ in 0..ATTACH_ATTEMPTS {
            let updated = sqlx::query_as::<_, Album>(&sql)
                .bind(album_id)
                .bind(photo_id)
                .bind(ALBUM_PHOTOS_MAX as i32)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("attach photo", e))?;

            if let Some(album) = updated {
                return Ok(AttachOutcome::Attached(album));
            }

            // Nothing changed: find out which guard rejected the update
            let photos = self.album_photos(album_id).await?;
            if let Some(outcome) = rejected_attach(photos.as_deref(), photo_id) {
                return Ok(outcome);
            }
            log::debug!("Album {} changed during attach, retrying", album_id);
        }

        Err(GalleryError::DatabaseError(format!(
            "attach photo failed: album {} kept changing",
            album_id
        )))
    }

    async fn detach_photo(
        &self,
        album_id: &str,
        photo_id: &str,
    ) -> Result<DetachOutcome, GalleryError> {
        let sql = format!(
            r#"
            UPDATE albums SET photos = array_remove(photos, $2::text)
            WHERE id = $1 AND $2::text = ANY(photos)
            RETURNING {}
            "#,
            ALBUM_COLUMNS
        );
        let updated = sqlx::query_as::<_, Album>(&sql)
            .bind(album_id)
            .bind(photo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("detach photo", e))?;

        if let Some(album) = updated {
            return Ok(DetachOutcome::Detached(album));
        }

        Ok(match self.album_photos(album_id).await? {
            None => DetachOutcome::AlbumMissing,
            Some(_) => DetachOutcome::NotInAlbum,
        })
    }

    async fn close(&self) {
        self.pool.close().await;
        log::info!("Database pool closed");
    }
}
