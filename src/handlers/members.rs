//! # Member HTTP Handlers
//!
//! 회원 가입, 로그인, 로그아웃 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/api/member/signup` | - | 회원 가입 |
//! | `POST` | `/api/member/login` | - | 로그인, 액세스/리프레시 토큰 발급 |
//! | `POST` | `/api/member/logout` | 필요 | 리프레시 토큰 삭제 |
//! | `GET` | `/api/member/me` | 필요 | 내 정보 조회 |
//!
//! 인증이 필요한 핸들러는 `AuthMiddleware`가 등록한 [`AuthenticatedMember`]를
//! 추출자로 받습니다. 라우트 등록은 `routes` 모듈을 참고하세요.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::members::request::{LoginRequest, SignupRequest};
use crate::domain::models::auth::AuthenticatedMember;
use crate::services::members::MemberService;

/// 회원 가입
#[post("/signup")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = MemberService::instance();
    let response = service.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그인
///
/// 성공 시 액세스 토큰과 리프레시 토큰을 반환하고,
/// 리프레시 토큰은 Redis `RT:<memberId>`에 저장됩니다.
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = MemberService::instance();
    let response = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃
///
/// 인증된 회원의 리프레시 토큰을 삭제합니다.
/// 이미 발급된 액세스 토큰은 만료 시까지 유효합니다.
pub async fn logout(member: AuthenticatedMember) -> Result<HttpResponse, AppError> {
    let service = MemberService::instance();
    let response = service.logout(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 정보 조회
pub async fn me(member: AuthenticatedMember) -> Result<HttpResponse, AppError> {
    let service = MemberService::instance();
    let response = service.get_member(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(response))
}
