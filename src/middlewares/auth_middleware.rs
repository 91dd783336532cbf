//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 요청 주체를 등록합니다.
//! 만료된 액세스 토큰은 Redis에 저장된 리프레시 토큰으로 재발급됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! web::resource("/logout")
//!     .wrap(AuthMiddleware::required())
//!     .route(web::post().to(handlers::members::logout))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::repositories::tokens::{RefreshTokenRepository, RefreshTokenStore};
use crate::services::auth::TokenService;

pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>, refresh_tokens: Arc<dyn RefreshTokenStore>) -> Self {
        Self {
            tokens,
            refresh_tokens,
        }
    }

    /// 인증 실패 시 401을 반환하는 미들웨어
    ///
    /// 싱글톤 `TokenService`와 Redis `RefreshTokenRepository`를 사용합니다.
    pub fn required() -> Self {
        Self::new(TokenService::instance(), RefreshTokenRepository::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            refresh_tokens: self.refresh_tokens.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use crate::domain::models::auth::AuthenticatedMember;
    use crate::middlewares::auth_inner::{authenticate_request, AuthOutcome, NEW_ACCESS_TOKEN_HEADER};
    use crate::repositories::testing::InMemoryRefreshTokenStore;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App, HttpResponse};

    const MEMBER_ID: &str = "650f1c2a9b1e8a0001a1b2c3";

    fn settings() -> JwtSettings {
        JwtSettings {
            issuer: "member-auth-test".to_string(),
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl_seconds: 600,
            refresh_ttl_seconds: 2_592_000,
        }
    }

    fn expired_access_token() -> String {
        TokenService::new(JwtSettings {
            access_ttl_seconds: -120,
            ..settings()
        })
        .make_access_token(MEMBER_ID)
        .unwrap()
    }

    async fn whoami(member: AuthenticatedMember) -> HttpResponse {
        HttpResponse::Ok().body(member.member_id)
    }

    fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_valid_token_sets_principal() {
        let tokens = Arc::new(TokenService::new(settings()));
        let store = Arc::new(InMemoryRefreshTokenStore::default());
        let app = test::init_service(App::new().service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(tokens.clone(), store.clone()))
                .route(web::get().to(whoami)),
        ))
        .await;

        let access = tokens.make_access_token(MEMBER_ID).unwrap();
        let req = test::TestRequest::get().uri("/me").insert_header(bearer(&access)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(NEW_ACCESS_TOKEN_HEADER).is_none());
        assert_eq!(test::read_body(resp).await, MEMBER_ID.as_bytes());
        assert_eq!(store.lookups(), 0);
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let tokens = Arc::new(TokenService::new(settings()));
        let store = Arc::new(InMemoryRefreshTokenStore::default());
        let app = test::init_service(App::new().service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(tokens, store.clone()))
                .route(web::get().to(whoami)),
        ))
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.lookups(), 0);
    }

    #[actix_web::test]
    async fn test_expired_token_with_refresh_token_is_reissued() {
        let tokens = Arc::new(TokenService::new(settings()));
        let store = Arc::new(InMemoryRefreshTokenStore::default());
        let refresh = tokens.make_refresh_token(MEMBER_ID).unwrap();
        store.save(MEMBER_ID, &refresh, 2_592_000).await.unwrap();

        let app = test::init_service(App::new().service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(tokens.clone(), store.clone()))
                .route(web::get().to(whoami)),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(&expired_access_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let reissued = resp
            .headers()
            .get(NEW_ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .expect("New-Access-Token header");
        assert!(tokens.validate_access_token(&reissued));
        assert_eq!(test::read_body(resp).await, MEMBER_ID.as_bytes());
    }

    #[actix_web::test]
    async fn test_expired_token_without_refresh_token_is_unauthorized() {
        let tokens = Arc::new(TokenService::new(settings()));
        let store = Arc::new(InMemoryRefreshTokenStore::default());
        let app = test::init_service(App::new().service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(tokens, store.clone()))
                .route(web::get().to(whoami)),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(&expired_access_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().get(NEW_ACCESS_TOKEN_HEADER).is_none());
        assert_eq!(store.lookups(), 1);
    }

    /// 만료된 액세스 토큰으로 `/me`를 호출하고 (상태 코드, 재발급 헤더 존재 여부)를 반환합니다.
    async fn call_me_with_stored_refresh(stored_refresh: &str) -> (StatusCode, bool) {
        let tokens = Arc::new(TokenService::new(settings()));
        let store = Arc::new(InMemoryRefreshTokenStore::default());
        store.save(MEMBER_ID, stored_refresh, 2_592_000).await.unwrap();

        let app = test::init_service(App::new().service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(tokens, store.clone()))
                .route(web::get().to(whoami)),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(&expired_access_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(store.lookups(), 1);
        (resp.status(), resp.headers().contains_key(NEW_ACCESS_TOKEN_HEADER))
    }

    #[actix_web::test]
    async fn test_expired_refresh_token_is_not_reissued() {
        let stale_refresh = TokenService::new(JwtSettings {
            refresh_ttl_seconds: -120,
            ..settings()
        })
        .make_refresh_token(MEMBER_ID)
        .unwrap();

        let (status, reissued) = call_me_with_stored_refresh(&stale_refresh).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!reissued);
    }

    #[actix_web::test]
    async fn test_refresh_slot_signed_with_access_secret_is_not_reissued() {
        let access_as_refresh = TokenService::new(settings())
            .make_access_token(MEMBER_ID)
            .unwrap();

        let (status, reissued) = call_me_with_stored_refresh(&access_as_refresh).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!reissued);
    }

    #[actix_web::test]
    async fn test_malformed_token_never_touches_refresh_store() {
        let tokens = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        store
            .save(MEMBER_ID, &tokens.make_refresh_token(MEMBER_ID).unwrap(), 60)
            .await
            .unwrap();

        let outcome = authenticate_request(Some("Bearer not.a.jwt"), &tokens, &store).await;

        assert_eq!(outcome, AuthOutcome::Unauthenticated("유효하지 않은 AccessToken입니다."));
        assert_eq!(store.lookups(), 0);
    }

    #[actix_web::test]
    async fn test_authenticate_request_reissue_outcome() {
        let tokens = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        store
            .save(MEMBER_ID, &tokens.make_refresh_token(MEMBER_ID).unwrap(), 60)
            .await
            .unwrap();

        let header = format!("Bearer {}", expired_access_token());
        match authenticate_request(Some(&header), &tokens, &store).await {
            AuthOutcome::Reissued { member, access_token } => {
                assert_eq!(member, AuthenticatedMember::new(MEMBER_ID));
                assert!(tokens.validate_access_token(&access_token));
            }
            other => panic!("Expected Reissued, got {:?}", other),
        }
    }
}
