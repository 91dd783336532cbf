//! # 회원 서비스 구현
//!
//! 회원가입, 로그인, 로그아웃, 내 정보 조회를 담당합니다.
//!
//! ```text
//! MemberService
//! ├── MemberStore        (MongoDB members)
//! ├── RefreshTokenStore  (Redis RT:<memberId>)
//! └── TokenService       (JWT 발급/검증)
//! ```
//!
//! ## 토큰 생명주기
//!
//! 1. **로그인**: 액세스 토큰과 리프레시 토큰을 발급하고, 리프레시 토큰을
//!    `RT:<memberId>`에 토큰 수명과 같은 TTL로 저장합니다.
//! 2. **요청 인증**: 토큰 인증 미들웨어가 처리합니다.
//! 3. **로그아웃**: `RT:<memberId>`를 삭제합니다. 이미 발급된 액세스 토큰은
//!    만료될 때까지 유효하지만, 만료 후 재발급은 더 이상 되지 않습니다.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::members::{
    LoginRequest, LoginResponse, MemberResponse, MessageResponse, SignupRequest,
};
use crate::domain::entities::members::Member;
use crate::repositories::members::{MemberRepository, MemberStore};
use crate::repositories::tokens::{RefreshTokenRepository, RefreshTokenStore};
use crate::services::auth::TokenService;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "회원가입 성공";
pub const LOGOUT_SUCCESS_MESSAGE: &str = "로그아웃 성공";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "이미 존재하는 이메일입니다.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "이메일 또는 비밀번호가 잘못되었습니다.";
pub const MEMBER_NOT_FOUND_MESSAGE: &str = "회원 정보가 없습니다.";
pub const REFRESH_TOKEN_NOT_FOUND_MESSAGE: &str = "리프레시 토큰이 존재하지 않습니다.";

static MEMBER_SERVICE_INSTANCE: OnceCell<Arc<MemberService>> = OnceCell::new();

/// 회원 관리 비즈니스 로직 서비스
///
/// ## 에러 처리 전략
///
/// - **ValidationError**: 잘못된 회원 ID 형식
/// - **BadRequest**: 중복 이메일, 리프레시 토큰 없음
/// - **AuthenticationError**: 이메일 또는 비밀번호 불일치 (둘을 구분하지 않음)
/// - **NotFound**: 회원 정보 없음
/// - **InternalError**: 해싱/서명 실패
pub struct MemberService {
    members: Arc<dyn MemberStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
    /// 존재하지 않는 이메일 로그인 시 검증에 쓰는 해시 (같은 cost)
    dummy_hash: OnceCell<String>,
}

impl MemberService {
    pub fn new(
        members: Arc<dyn MemberStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        tokens: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            members,
            refresh_tokens,
            tokens,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    /// MongoDB/Redis 리포지토리로 구성된 싱글톤 인스턴스를 반환합니다.
    pub fn instance() -> Arc<Self> {
        MEMBER_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    MemberRepository::instance(),
                    RefreshTokenRepository::instance(),
                    TokenService::instance(),
                    PasswordConfig::bcrypt_cost(),
                ))
            })
            .clone()
    }

    /// 새 회원을 등록합니다.
    ///
    /// # Arguments
    ///
    /// * `request` - 검증이 끝난 회원가입 요청
    ///
    /// # Errors
    ///
    /// * `AppError::BadRequest` - 이미 존재하는 이메일
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let response = MemberService::instance().signup(request).await?;
    /// assert_eq!(response.message, "회원가입 성공");
    /// ```
    pub async fn signup(&self, request: SignupRequest) -> AppResult<MessageResponse> {
        if self.members.exists_by_email(&request.email).await? {
            log::info!("중복 이메일로 회원가입 시도: {}", request.email);
            return Err(AppError::BadRequest(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }

        let hash_start = Instant::now();
        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let member = self
            .members
            .save(Member::new(request.email, password_hash, request.name))
            .await?;

        log::info!(
            "✅ 회원가입 완료: member_id={}",
            member.id_string().unwrap_or_default()
        );

        Ok(MessageResponse::new(SIGNUP_SUCCESS_MESSAGE))
    }

    /// 이메일/비밀번호로 로그인하고 토큰을 발급합니다.
    ///
    /// 리프레시 토큰은 `RT:<memberId>`에 저장되며, 이전 로그인의 리프레시 토큰을 덮어씁니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 이메일이 없거나 비밀번호가 틀림
    /// * `AppError::RedisError` - 리프레시 토큰 저장 실패
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let Some(member) = self.members.find_by_email(&request.email).await? else {
            // 가입 여부가 응답 시간으로 드러나지 않도록 같은 비용의 검증을 수행
            let _ = bcrypt::verify(&request.password, self.dummy_password_hash()?);
            log::warn!("로그인 실패 (존재하지 않는 이메일): {}", request.email);
            return Err(Self::invalid_credentials());
        };

        let password_matches = bcrypt::verify(&request.password, &member.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !password_matches {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", request.email);
            return Err(Self::invalid_credentials());
        }

        let member_id = member
            .id_string()
            .ok_or_else(|| AppError::InternalError("회원 ID가 없습니다".to_string()))?;

        let access_token = self.tokens.make_access_token(&member_id)?;
        let refresh_token = self.tokens.make_refresh_token(&member_id)?;

        let refresh_ttl = u64::try_from(self.tokens.refresh_token_ttl_seconds())
            .map_err(|_| AppError::InternalError("리프레시 토큰 TTL이 음수입니다".to_string()))?;
        self.refresh_tokens
            .save(&member_id, &refresh_token, refresh_ttl)
            .await?;

        log::info!("✅ 로그인 성공: member_id={}", member_id);

        Ok(LoginResponse::new(
            access_token,
            refresh_token,
            self.tokens.access_token_ttl_seconds(),
        ))
    }

    /// 인증된 회원의 리프레시 토큰을 폐기합니다.
    ///
    /// # Arguments
    ///
    /// * `member_id` - 요청 주체의 회원 ID
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 회원 정보가 없음
    /// * `AppError::BadRequest` - 저장된 리프레시 토큰이 없음 (이미 로그아웃됨)
    pub async fn logout(&self, member_id: &str) -> AppResult<MessageResponse> {
        let member = self.find_member(member_id).await?;
        let member_id = member.id_string().unwrap_or_else(|| member_id.to_string());

        if self.refresh_tokens.find(&member_id).await?.is_none() {
            return Err(AppError::BadRequest(REFRESH_TOKEN_NOT_FOUND_MESSAGE.to_string()));
        }

        self.refresh_tokens.delete(&member_id).await?;
        log::info!("👋 로그아웃 완료: member_id={}", member_id);

        Ok(MessageResponse::new(LOGOUT_SUCCESS_MESSAGE))
    }

    /// 인증된 회원의 정보를 조회합니다.
    pub async fn get_member(&self, member_id: &str) -> AppResult<MemberResponse> {
        self.members
            .find_profile_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEMBER_NOT_FOUND_MESSAGE.to_string()))
    }

    async fn find_member(&self, member_id: &str) -> AppResult<Member> {
        self.members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEMBER_NOT_FOUND_MESSAGE.to_string()))
    }

    fn dummy_password_hash(&self) -> AppResult<&str> {
        self.dummy_hash
            .get_or_try_init(|| bcrypt::hash("member-auth-dummy-password", self.bcrypt_cost))
            .map(String::as_str)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    fn invalid_credentials() -> AppError {
        AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
    }
}

#[async_trait]
impl Service for MemberService {
    fn name(&self) -> &str {
        "MemberService"
    }

    async fn init(&self) -> AppResult<()> {
        log::info!("bcrypt cost: {}", self.bcrypt_cost);
        Ok(())
    }
}

fn create_member_service() -> Arc<dyn Service> {
    MemberService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "member_service",
        constructor: create_member_service,
    }
}
