//! HTTP handlers and route configuration.

mod comments;
mod feed;
mod health;


use actix_web::web;

use crate::middleware::error::{AppError, AppResult};

/// Largest accepted form body. Comment length is checked after the cooldown,
/// so this only caps memory use.
const FORM_LIMIT: usize = 10 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/")
            .route(web::get().to(feed::home))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/categories/{id}")
            .route(web::get().to(feed::category))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/comments")
            .route(web::post().to(comments::create))
            .default_service(web::to(method_not_allowed)),
    )
    .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}

async fn method_not_allowed() -> AppResult<actix_web::HttpResponse> {
    Err(AppError::MethodNotAllowed)
}
