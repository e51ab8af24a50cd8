// src/handlers/health.rs
// DOCUMENTATION: Health check and app manifest handlers
// PURPOSE: Service status and the configuration surfaced to the mobile app

use crate::config::{AppManifest, Config};
use crate::errors::FinderError;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "weather-finder",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /app/manifest
/// DOCUMENTATION: Unauthenticated and carries the configured API keys, so it
/// is only served outside production. ENVIRONMENT=production answers 404.
pub async fn app_manifest(config: web::Data<Config>) -> Result<HttpResponse, FinderError> {
    if config.is_production() {
        return Err(FinderError::NotFound("/app/manifest".to_string()));
    }
    Ok(HttpResponse::Ok().json(AppManifest::from_config(config.get_ref())))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/app/manifest", web::get().to(app_manifest));
}
