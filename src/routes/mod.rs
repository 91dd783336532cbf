//! # Route Configuration
//!
//! 애플리케이션의 모든 라우트를 등록합니다.
//!
//! ```text
//! GET  /health                 공개
//! POST /api/member/signup      공개
//! POST /api/member/login       공개
//! POST /api/member/logout      AuthMiddleware::required()
//! GET  /api/member/me          AuthMiddleware::required()
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_member_routes(cfg);
}

fn configure_member_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/member")
            .service(handlers::members::signup)
            .service(handlers::members::login)
            .service(
                web::resource("/logout")
                    .wrap(AuthMiddleware::required())
                    .route(web::post().to(handlers::members::logout)),
            )
            .service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(handlers::members::me)),
            ),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "member_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "token_store": "Redis",
            "token_algorithm": "HS512"
        }
    }))
}
