//! JWT 클레임 구조체와 토큰 종류/검증 결과
//!
//! 액세스 토큰과 리프레시 토큰은 같은 클레임 구조를 공유하고,
//! 서명 비밀키와 만료 시간만 다릅니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `iss`: 토큰 발급자
/// - `sub`: 토큰의 주체 (회원 ID)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `id`: 회원 ID (`sub`와 동일). 만료된 토큰에서 회원을 찾을 때 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub id: String,
}

/// 토큰 종류
///
/// 종류별로 서로 다른 서명 키와 만료 시간을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// 액세스 토큰 검증 결과
///
/// 만료만 구분하고, 형식 오류·서명 불일치·발급자 불일치는 모두 `Invalid`입니다.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenVerification {
    /// 서명과 만료 시간 모두 유효
    Valid(TokenClaims),
    /// 서명은 유효하지만 만료됨. 클레임은 재발급 판단에 사용됩니다.
    Expired(TokenClaims),
    /// 그 외 모든 검증 실패
    Invalid,
}
