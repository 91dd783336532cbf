//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급, 검증, 재발급을 담당합니다.
//!
//! - 서명 알고리즘: HMAC-SHA-512 (`typ=JWT`, `alg=HS512`)
//! - 클레임: `iss`, `sub`(회원 ID), `iat`, `exp`, `id`(회원 ID)
//! - 액세스/리프레시 토큰은 서로 다른 비밀키로 서명됩니다.
//! - 시계 오차 허용(leeway)은 0초입니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;

use crate::config::JwtSettings;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::models::auth::AuthenticatedMember;
use crate::domain::models::token::{TokenClaims, TokenKind, TokenVerification};
use crate::repositories::tokens::RefreshTokenStore;

static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

/// JWT 토큰 관리 서비스
///
/// 외부 저장소에 의존하지 않는 순수한 서명/검증 로직입니다.
/// 리프레시 토큰 저장은 호출자(`MemberService`)가 `RefreshTokenStore`로 수행합니다.
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// 환경 변수 설정으로 생성된 싱글톤 인스턴스를 반환합니다.
    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(JwtSettings::from_env())))
            .clone()
    }

    /// 회원 ID로 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.make_access_token(&member_id)?;
    /// ```
    pub fn make_access_token(&self, member_id: &str) -> AppResult<String> {
        self.create_token(member_id, TokenKind::Access)
    }

    /// 회원 ID로 리프레시 토큰을 발급합니다.
    ///
    /// 발급만 수행하며 Redis 저장은 하지 않습니다.
    pub fn make_refresh_token(&self, member_id: &str) -> AppResult<String> {
        self.create_token(member_id, TokenKind::Refresh)
    }

    fn create_token(&self, member_id: &str, kind: TokenKind) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now.checked_add(self.ttl_seconds(kind)).ok_or_else(|| {
            AppError::InternalError(format!("{} 토큰 만료 시각 계산 실패", kind.as_str()))
        })?;

        let claims = TokenClaims {
            iss: self.settings.issuer.clone(),
            sub: member_id.to_string(),
            iat: now,
            exp,
            id: member_id.to_string(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret(kind).as_bytes());

        encode(&Header::new(Algorithm::HS512), &claims, &encoding_key).map_err(|e| {
            AppError::InternalError(format!("{} 토큰 생성 실패: {}", kind.as_str(), e))
        })
    }

    /// 액세스 토큰이 유효한지 확인합니다. 모든 검증 실패는 `false`입니다.
    pub fn validate_access_token(&self, token: &str) -> bool {
        self.decode_claims(token, TokenKind::Access, true).is_ok()
    }

    /// 리프레시 토큰이 유효한지 확인합니다. 모든 검증 실패는 `false`입니다.
    pub fn validate_refresh_token(&self, token: &str) -> bool {
        self.decode_claims(token, TokenKind::Refresh, true).is_ok()
    }

    /// 액세스 토큰을 검증하고, 만료된 경우를 따로 구분합니다.
    ///
    /// 만료된 토큰도 서명과 발급자가 올바르면 클레임을 복원하여 `Expired`로 돌려줍니다.
    /// 서명이 틀린 토큰에서 회원 ID를 읽는 일은 없습니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// match token_service.verify_access_token(token) {
    ///     TokenVerification::Valid(claims) => { /* 인증 */ }
    ///     TokenVerification::Expired(claims) => { /* claims.id로 리프레시 토큰 조회 */ }
    ///     TokenVerification::Invalid => { /* 미인증 */ }
    /// }
    /// ```
    pub fn verify_access_token(&self, token: &str) -> TokenVerification {
        match self.decode_claims(token, TokenKind::Access, true) {
            Ok(claims) => TokenVerification::Valid(claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                match self.decode_claims(token, TokenKind::Access, false) {
                    Ok(claims) => TokenVerification::Expired(claims),
                    Err(_) => TokenVerification::Invalid,
                }
            }
            Err(e) => {
                log::debug!("액세스 토큰 검증 실패: {}", e);
                TokenVerification::Invalid
            }
        }
    }

    /// 리프레시 토큰의 클레임을 반환합니다. 유효하지 않으면 `None`입니다.
    pub fn refresh_token_claims(&self, token: &str) -> Option<TokenClaims> {
        self.decode_claims(token, TokenKind::Refresh, true).ok()
    }

    fn decode_claims(
        &self,
        token: &str,
        kind: TokenKind,
        validate_exp: bool,
    ) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret(kind).as_bytes());

        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;

        decode::<TokenClaims>(token, &decoding_key, &validation).map(|data| data.claims)
    }

    /// 만료된 액세스 토큰의 클레임으로 새 액세스 토큰을 발급합니다.
    ///
    /// `RT:<id>`에 저장된 리프레시 토큰이 있고, 유효하며, 같은 회원의 것일 때만
    /// 새 토큰을 돌려줍니다. 리프레시 토큰은 교체하지 않습니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(token))` - 재발급된 액세스 토큰
    /// * `Ok(None)` - 저장된 리프레시 토큰이 없거나 유효하지 않음
    ///
    /// # Errors
    ///
    /// * `AppError::RedisError` - 저장소 조회 실패
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub async fn reissue_access_token(
        &self,
        expired: &TokenClaims,
        store: &dyn RefreshTokenStore,
    ) -> AppResult<Option<String>> {
        let Some(refresh_token) = store.find(&expired.id).await? else {
            log::debug!("저장된 리프레시 토큰 없음: member_id={}", expired.id);
            return Ok(None);
        };

        match self.refresh_token_claims(&refresh_token) {
            Some(claims) if claims.id == expired.id => {
                let access_token = self.make_access_token(&expired.id)?;
                log::info!("🔄 액세스 토큰 재발급: member_id={}", expired.id);
                Ok(Some(access_token))
            }
            Some(_) => {
                log::warn!("리프레시 토큰의 회원 ID 불일치: member_id={}", expired.id);
                Ok(None)
            }
            None => {
                log::debug!("저장된 리프레시 토큰이 유효하지 않음: member_id={}", expired.id);
                Ok(None)
            }
        }
    }

    /// 검증된 클레임으로 요청 주체를 만듭니다. 역할은 항상 `ROLE_USER` 하나입니다.
    pub fn get_authentication(&self, claims: &TokenClaims) -> AuthenticatedMember {
        AuthenticatedMember::new(claims.sub.clone())
    }

    /// Authorization 헤더에서 토큰 부분만 추출합니다.
    ///
    /// 헤더가 없거나 `Bearer ` 접두사가 없으면 빈 문자열을 반환합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = TokenService::extract_bearer_token(Some("Bearer eyJhbGciOi..."));
    /// assert_eq!(TokenService::extract_bearer_token(None), "");
    /// ```
    pub fn extract_bearer_token(auth_header: Option<&str>) -> &str {
        auth_header
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .unwrap_or("")
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.settings.access_ttl_seconds
    }

    /// 리프레시 토큰 수명 (초). Redis 키 만료 시간과 같습니다.
    pub fn refresh_token_ttl_seconds(&self) -> i64 {
        self.settings.refresh_ttl_seconds
    }

    fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.settings.access_ttl_seconds,
            TokenKind::Refresh => self.settings.refresh_ttl_seconds,
        }
    }

    fn secret(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.settings.access_secret,
            TokenKind::Refresh => &self.settings.refresh_secret,
        }
    }
}

#[async_trait]
impl Service for TokenService {
    fn name(&self) -> &str {
        "TokenService"
    }

    async fn init(&self) -> AppResult<()> {
        if self.settings.access_secret == self.settings.refresh_secret {
            log::warn!("액세스 토큰과 리프레시 토큰이 같은 비밀키를 사용합니다");
        }

        log::info!(
            "JWT 설정: issuer={}, access={}s, refresh={}s",
            self.settings.issuer,
            self.settings.access_ttl_seconds,
            self.settings.refresh_ttl_seconds
        );
        Ok(())
    }
}

fn create_token_service() -> Arc<dyn Service> {
    TokenService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "token_service",
        constructor: create_token_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::testing::InMemoryRefreshTokenStore;

    const MEMBER_ID: &str = "650f1c2a9b1e8a0001a1b2c3";

    fn settings() -> JwtSettings {
        JwtSettings {
            issuer: "member-auth-test".to_string(),
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl_seconds: 600,
            refresh_ttl_seconds: 30 * 24 * 60 * 60,
        }
    }

    fn expired_access_settings() -> JwtSettings {
        JwtSettings {
            access_ttl_seconds: -120,
            ..settings()
        }
    }

    #[test]
    fn test_access_token_claims() {
        let service = TokenService::new(settings());
        let token = service.make_access_token(MEMBER_ID).unwrap();

        let TokenVerification::Valid(claims) = service.verify_access_token(&token) else {
            panic!("Expected a valid token");
        };
        assert_eq!(claims.iss, "member-auth-test");
        assert_eq!(claims.sub, MEMBER_ID);
        assert_eq!(claims.id, MEMBER_ID);
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_token_header_is_hs512_jwt() {
        let service = TokenService::new(settings());
        let token = service.make_access_token(MEMBER_ID).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_access_and_refresh_secrets_are_not_interchangeable() {
        let service = TokenService::new(settings());
        let access = service.make_access_token(MEMBER_ID).unwrap();
        let refresh = service.make_refresh_token(MEMBER_ID).unwrap();

        assert!(service.validate_access_token(&access));
        assert!(service.validate_refresh_token(&refresh));
        assert!(!service.validate_access_token(&refresh));
        assert!(!service.validate_refresh_token(&access));
    }

    #[test]
    fn test_expired_access_token_keeps_claims() {
        let service = TokenService::new(expired_access_settings());
        let token = service.make_access_token(MEMBER_ID).unwrap();

        assert!(!service.validate_access_token(&token));
        match service.verify_access_token(&token) {
            TokenVerification::Expired(claims) => assert_eq!(claims.id, MEMBER_ID),
            other => panic!("Expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_and_foreign_tokens_are_invalid() {
        let service = TokenService::new(settings());
        let foreign = TokenService::new(JwtSettings {
            access_secret: "someone-elses-secret".to_string(),
            ..settings()
        })
        .make_access_token(MEMBER_ID)
        .unwrap();
        let other_issuer = TokenService::new(JwtSettings {
            issuer: "other-issuer".to_string(),
            ..settings()
        })
        .make_access_token(MEMBER_ID)
        .unwrap();

        assert_eq!(service.verify_access_token(""), TokenVerification::Invalid);
        assert_eq!(service.verify_access_token("not.a.jwt"), TokenVerification::Invalid);
        assert_eq!(service.verify_access_token(&foreign), TokenVerification::Invalid);
        assert_eq!(service.verify_access_token(&other_issuer), TokenVerification::Invalid);
    }

    #[test]
    fn test_expired_token_with_wrong_signature_is_invalid() {
        let forged = TokenService::new(JwtSettings {
            access_secret: "forged-secret".to_string(),
            ..expired_access_settings()
        })
        .make_access_token(MEMBER_ID)
        .unwrap();

        let service = TokenService::new(settings());
        assert_eq!(service.verify_access_token(&forged), TokenVerification::Invalid);
    }

    #[test]
    fn test_get_authentication_uses_subject_and_role_user() {
        let service = TokenService::new(settings());
        let token = service.make_access_token(MEMBER_ID).unwrap();
        let TokenVerification::Valid(claims) = service.verify_access_token(&token) else {
            panic!("Expected a valid token");
        };

        let member = service.get_authentication(&claims);
        assert_eq!(member.member_id, MEMBER_ID);
        assert_eq!(member.roles, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token(Some("Bearer abc.def.ghi")), "abc.def.ghi");
        assert_eq!(TokenService::extract_bearer_token(Some("Basic dXNlcjpwdw==")), "");
        assert_eq!(TokenService::extract_bearer_token(Some("")), "");
        assert_eq!(TokenService::extract_bearer_token(None), "");
    }

    #[actix_web::test]
    async fn test_reissue_with_stored_refresh_token() {
        let service = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        let refresh = service.make_refresh_token(MEMBER_ID).unwrap();
        store.save(MEMBER_ID, &refresh, 60).await.unwrap();

        let expired = TokenService::new(expired_access_settings())
            .make_access_token(MEMBER_ID)
            .unwrap();
        let TokenVerification::Expired(claims) = service.verify_access_token(&expired) else {
            panic!("Expected Expired");
        };

        let reissued = service.reissue_access_token(&claims, &store).await.unwrap();
        assert!(service.validate_access_token(&reissued.unwrap()));
    }

    #[actix_web::test]
    async fn test_reissue_without_refresh_token_returns_none() {
        let service = TokenService::new(expired_access_settings());
        let store = InMemoryRefreshTokenStore::default();
        let claims = TokenClaims {
            iss: "member-auth-test".to_string(),
            sub: MEMBER_ID.to_string(),
            iat: 0,
            exp: 1,
            id: MEMBER_ID.to_string(),
        };

        assert_eq!(service.reissue_access_token(&claims, &store).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_reissue_rejects_refresh_token_of_another_member() {
        let service = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        let other_refresh = service.make_refresh_token("650f1c2a9b1e8a0001ffffff").unwrap();
        store.save(MEMBER_ID, &other_refresh, 60).await.unwrap();

        let claims = TokenClaims {
            iss: "member-auth-test".to_string(),
            sub: MEMBER_ID.to_string(),
            iat: 0,
            exp: 1,
            id: MEMBER_ID.to_string(),
        };

        assert_eq!(service.reissue_access_token(&claims, &store).await.unwrap(), None);
    }

    fn expired_claims() -> TokenClaims {
        TokenClaims {
            iss: "member-auth-test".to_string(),
            sub: MEMBER_ID.to_string(),
            iat: 0,
            exp: 1,
            id: MEMBER_ID.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_reissue_rejects_expired_refresh_token() {
        let service = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        let stale_refresh = TokenService::new(JwtSettings {
            refresh_ttl_seconds: -120,
            ..settings()
        })
        .make_refresh_token(MEMBER_ID)
        .unwrap();
        store.save(MEMBER_ID, &stale_refresh, 60).await.unwrap();

        assert_eq!(service.reissue_access_token(&expired_claims(), &store).await.unwrap(), None);
        assert_eq!(store.lookups(), 1);
    }

    #[actix_web::test]
    async fn test_reissue_rejects_refresh_slot_holding_access_token() {
        let service = TokenService::new(settings());
        let store = InMemoryRefreshTokenStore::default();
        let access = service.make_access_token(MEMBER_ID).unwrap();
        store.save(MEMBER_ID, &access, 60).await.unwrap();

        assert_eq!(service.reissue_access_token(&expired_claims(), &store).await.unwrap(), None);
    }

    #[test]
    fn test_token_expiry_overflow_is_internal_error() {
        let service = TokenService::new(JwtSettings {
            access_ttl_seconds: i64::MAX,
            ..settings()
        });

        match service.make_access_token(MEMBER_ID) {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("만료 시각")),
            other => panic!("Expected InternalError, got {:?}", other.map(|_| ())),
        }
    }
}
