// src/handlers/community.rs
// DOCUMENTATION: HTTP handlers for users, saved places and posts
// PURPOSE: Parse requests, call the community service, return responses

use crate::errors::FinderError;
use crate::models::{saved_places_to_geojson, NewPost, NewSavedPlace, NewUser, PostFilter};
use crate::services::CommunityService;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// POST /users
pub async fn create_user(
    service: web::Data<CommunityService>,
    req: web::Json<NewUser>,
) -> Result<impl Responder, FinderError> {
    req.validate()?;
    let user = service.create_user(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /users/{id}
pub async fn get_user(
    service: web::Data<CommunityService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, FinderError> {
    let user = service.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// POST /users/{id}/saved-places
pub async fn save_place(
    service: web::Data<CommunityService>,
    path: web::Path<Uuid>,
    req: web::Json<NewSavedPlace>,
) -> Result<impl Responder, FinderError> {
    req.validate()?;
    let place = service.save_place(path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(place))
}

/// GET /users/{id}/saved-places
pub async fn list_saved_places(
    service: web::Data<CommunityService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, FinderError> {
    let places = service.list_saved_places(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /users/{id}/saved-places/geojson
/// Saved places as a GeoJSON FeatureCollection for map rendering
pub async fn saved_places_geojson(
    service: web::Data<CommunityService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, FinderError> {
    let places = service.list_saved_places(path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(saved_places_to_geojson(&places)))
}

/// POST /posts
pub async fn create_post(
    service: web::Data<CommunityService>,
    req: web::Json<NewPost>,
) -> Result<impl Responder, FinderError> {
    req.validate()?;
    let post = service.create_post(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /posts?user_id=&place_id=&limit=
pub async fn list_posts(
    service: web::Data<CommunityService>,
    query: web::Query<PostFilter>,
) -> Result<impl Responder, FinderError> {
    let posts = service.list_posts(&query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Configuration for community routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}/saved-places", web::post().to(save_place))
            .route("/{id}/saved-places", web::get().to(list_saved_places))
            .route("/{id}/saved-places/geojson", web::get().to(saved_places_geojson)),
    )
    .service(
        web::scope("/posts")
            .route("", web::post().to(create_post))
            .route("", web::get().to(list_posts)),
    );
}
