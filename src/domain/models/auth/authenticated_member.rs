use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

/// 인증된 회원에게 부여되는 유일한 역할
pub const ROLE_USER: &str = "ROLE_USER";

/// 액세스 토큰에서 추출된 요청 주체 (principal)
///
/// 토큰 인증 미들웨어가 요청 extensions에 넣고,
/// 핸들러는 `FromRequest` 구현을 통해 꺼내 씁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedMember {
    /// 회원 ID (토큰 `sub` 클레임)
    pub member_id: String,

    /// 역할 목록. 항상 `ROLE_USER` 하나입니다.
    pub roles: Vec<String>,
}

impl AuthenticatedMember {
    pub fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            roles: vec![ROLE_USER.to_string()],
        }
    }
}

impl FromRequest for AuthenticatedMember {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedMember>() {
            Some(member) => ready(Ok(member.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증이 필요합니다".to_string(),
            ))),
        }
    }
}
