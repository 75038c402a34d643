// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photo operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::Repository;
use crate::errors::GalleryError;
use crate::models::{CreatePhotoRequest, DeletedResponse, UpdatePhotoRequest};
use crate::services::PhotoService;
use actix_web::{web, HttpResponse, Responder};

/// GET /photos
pub async fn list_photos(repo: web::Data<dyn Repository>) -> Result<impl Responder, GalleryError> {
    let photos = PhotoService::list_photos(repo.get_ref()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /photos/{id}
pub async fn get_photo(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let photo = PhotoService::get_photo(repo.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// POST /photos
pub async fn create_photo(
    repo: web::Data<dyn Repository>,
    req: web::Json<CreatePhotoRequest>,
) -> Result<impl Responder, GalleryError> {
    let photo = PhotoService::create_photo(repo.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(photo))
}

/// PUT /photos/{id}
/// Only the fields present in the body are changed
pub async fn update_photo(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
    req: web::Json<UpdatePhotoRequest>,
) -> Result<impl Responder, GalleryError> {
    let photo =
        PhotoService::update_photo(repo.get_ref(), &path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    repo: web::Data<dyn Repository>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let id = PhotoService::delete_photo(repo.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::ok("Photo deleted", id)))
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/photos")
            .route("", web::get().to(list_photos))
            .route("", web::post().to(create_photo))
            .route("/{id}", web::get().to(get_photo))
            .route("/{id}", web::put().to(update_photo))
            .route("/{id}", web::delete().to(delete_photo)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;
    use crate::handlers::{json_config, not_found};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn repo() -> web::Data<dyn Repository> {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        web::Data::from(repo)
    }

    macro_rules! app {
        ($repo:expr) => {
            test::init_service(
                App::new()
                    .app_data($repo.clone())
                    .app_data(json_config())
                    .configure(config)
                    .default_service(web::route().to(not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_without_title_is_rejected() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::post()
            .uri("/photos")
            .set_json(json!({ "url": "https://example.com/a.jpg" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);

        let req = test::TestRequest::get().uri("/photos").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, json!([]));
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::post()
            .uri("/photos")
            .set_json(json!({
                "title": "Beach",
                "url": "https://example.com/beach.jpg",
                "description": "Sunny day"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert!(created["createdAt"].is_string());

        let req = test::TestRequest::get()
            .uri(&format!("/photos/{}", id))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["title"], "Beach");
        assert_eq!(fetched["url"], "https://example.com/beach.jpg");
        assert_eq!(fetched["description"], "Sunny day");
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::post()
            .uri("/photos")
            .set_json(json!({ "title": "Beach", "url": "https://example.com/beach.jpg" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/photos/{}", id))
            .set_json(json!({ "description": "Golden hour" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(resp).await;

        assert_eq!(updated["description"], "Golden hour");
        assert_eq!(updated["title"], created["title"]);
        assert_eq!(updated["url"], created["url"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[actix_web::test]
    async fn test_update_missing_photo() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::put()
            .uri("/photos/missing")
            .set_json(json!({ "title": "New" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_returns_confirmation() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::post()
            .uri("/photos")
            .set_json(json!({ "title": "Beach" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/photos/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["id"], id);

        let req = test::TestRequest::delete()
            .uri(&format!("/photos/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_json_uses_error_envelope() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::post()
            .uri("/photos")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
    }

    #[actix_web::test]
    async fn test_unknown_route_is_json_404() {
        let repo = repo();
        let app = app!(repo);

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "code": 404, "message": "Not Found" }));
    }
}
