// src/handlers/albums.rs
// DOCUMENTATION: HTTP handlers for album operations
// PURPOSE: Album CRUD plus the nested photo attach/detach routes

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{
    AddPhotoRequest, CreateAlbumRequest, DeletedResponse, MessageResponse, UpdateAlbumRequest,
};
use crate::services::AlbumService;
use actix_web::{web, HttpResponse, Responder};

/// GET /albums
/// Photos are expanded inline
pub async fn list_albums(repo: web::Data<dyn Repository>) -> Result<impl Responder, GalleryError> {
    let albums = AlbumService::list_albums(repo.get_ref()).await?;
    Ok(HttpResponse::Ok().json(albums))
}

/// GET /albums/{id}
pub async fn get_album(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let album = AlbumService::get_album(repo.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(album))
}

/// POST /albums
pub async fn create_album(
    repo: web::Data<dyn Repository>,
    req: web::Json<CreateAlbumRequest>,
) -> Result<impl Responder, GalleryError> {
    let album = AlbumService::create_album(repo.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(album))
}

/// PUT /albums/{id}
pub async fn update_album(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
    req: web::Json<UpdateAlbumRequest>,
) -> Result<impl Responder, GalleryError> {
    let album =
        AlbumService::update_album(repo.get_ref(), &path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(album))
}

/// DELETE /albums/{id}
pub async fn delete_album(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let id = AlbumService::delete_album(repo.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::ok("Album deleted", id)))
}

/// POST /albums/{id}/photos
/// Body: {"photoId": "..."}
pub async fn add_photo_to_album(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
    req: web::Json<AddPhotoRequest>,
) -> Result<impl Responder, GalleryError> {
    let album = AlbumService::add_photo(repo.get_ref(), &path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Photo added to album", album)))
}

/// DELETE /albums/{id}/photos/{photo_id}
pub async fn remove_photo_from_album(
    repo: web::Data<dyn Repository>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, GalleryError> {
    let (album_id, photo_id) = path.into_inner();
    let album = AlbumService::remove_photo(repo.get_ref(), &album_id, &photo_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Photo removed from album", album)))
}

/// Configuration for album routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/albums")
            .route("", web::get().to(list_albums))
            .route("", web::post().to(create_album))
            .route("/{id}", web::get().to(get_album))
            .route("/{id}", web::put().to(update_album))
            .route("/{id}", web::delete().to(delete_album))
            .route("/{id}/photos", web::post().to(add_photo_to_album))
            .route(
                "/{id}/photos/{photo_id}",
                web::delete().to(remove_photo_from_album),
            ),
    );
}
