//! AuthMiddleware 인증 로직의 핵심적인 기능
//!
//! 요청마다 다음 순서로 처리합니다.
//!
//! 1. `Authorization: Bearer <token>`에서 토큰 추출 (없으면 빈 문자열)
//! 2. 유효한 토큰 → 요청 주체 등록
//! 3. 만료된 토큰 → 만료 클레임의 `id`로 `RT:<id>` 조회, 리프레시 토큰이 유효하면
//!    새 액세스 토큰을 발급하여 `New-Access-Token` 응답 헤더로 전달
//! 4. 그 외 → 401 Unauthorized (`{"error": "..."}`)
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::ErrorContext;
use crate::domain::models::auth::AuthenticatedMember;
use crate::domain::models::token::TokenVerification;
use crate::repositories::tokens::RefreshTokenStore;
use crate::services::auth::TokenService;

/// 재발급된 액세스 토큰을 담는 응답 헤더
pub const NEW_ACCESS_TOKEN_HEADER: &str = "new-access-token";

/// 토큰 인증 결과
#[derive(Debug, PartialEq)]
pub(crate) enum AuthOutcome {
    /// 유효한 액세스 토큰
    Authenticated(AuthenticatedMember),
    /// 만료된 액세스 토큰을 리프레시 토큰으로 재발급함
    Reissued {
        member: AuthenticatedMember,
        access_token: String,
    },
    /// 인증 실패. 클라이언트에 보낼 메시지를 담습니다.
    Unauthenticated(&'static str),
}

/// Authorization 헤더 값으로 요청을 인증합니다.
///
/// 리프레시 토큰 저장소는 액세스 토큰이 만료된 경우에만 조회합니다.
pub(crate) async fn authenticate_request(
    auth_header: Option<&str>,
    tokens: &TokenService,
    refresh_tokens: &dyn RefreshTokenStore,
) -> AuthOutcome {
    let token = TokenService::extract_bearer_token(auth_header);
    if token.is_empty() {
        return AuthOutcome::Unauthenticated("인증이 필요합니다");
    }

    match tokens.verify_access_token(token) {
        TokenVerification::Valid(claims) => {
            AuthOutcome::Authenticated(tokens.get_authentication(&claims))
        }
        TokenVerification::Expired(claims) => {
            match tokens.reissue_access_token(&claims, refresh_tokens).await {
                Ok(Some(access_token)) => AuthOutcome::Reissued {
                    member: AuthenticatedMember::new(claims.id),
                    access_token,
                },
                Ok(None) => AuthOutcome::Unauthenticated("토큰이 만료되었습니다. 다시 로그인해주세요"),
                Err(e) => {
                    log::error!("액세스 토큰 재발급 중 오류: {}", e);
                    AuthOutcome::Unauthenticated("토큰이 만료되었습니다. 다시 로그인해주세요")
                }
            }
        }
        TokenVerification::Invalid => AuthOutcome::Unauthenticated("유효하지 않은 AccessToken입니다."),
    }
}

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();
        let refresh_tokens = self.refresh_tokens.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            let outcome =
                authenticate_request(auth_header.as_deref(), &tokens, refresh_tokens.as_ref()).await;

            let reissued_token = match outcome {
                AuthOutcome::Authenticated(member) => {
                    log::debug!("인증 성공: member_id={}", member.member_id);
                    req.extensions_mut().insert(member);
                    None
                }
                AuthOutcome::Reissued { member, access_token } => {
                    log::debug!("재발급 토큰으로 인증: member_id={}", member.member_id);
                    req.extensions_mut().insert(member);
                    Some(access_token)
                }
                AuthOutcome::Unauthenticated(message) => {
                    log::warn!("인증 실패: {} ({})", message, req.path());
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({ "error": message }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            let mut res = service.call(req).await?;

            if let Some(access_token) = reissued_token {
                match HeaderValue::from_str(&access_token).context("재발급 토큰 헤더 생성 실패") {
                    Ok(value) => {
                        res.headers_mut()
                            .insert(HeaderName::from_static(NEW_ACCESS_TOKEN_HEADER), value);
                    }
                    Err(e) => log::error!("{}", e),
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}
