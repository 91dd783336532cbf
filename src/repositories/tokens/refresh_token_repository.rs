use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};

/// 리프레시 토큰 Redis 키 접두사
pub const REFRESH_TOKEN_KEY_PREFIX: &str = "RT:";

/// 회원 ID로 Redis 키를 만듭니다. (`RT:<memberId>`)
pub fn refresh_token_key(member_id: &str) -> String {
    format!("{}{}", REFRESH_TOKEN_KEY_PREFIX, member_id)
}

/// 리프레시 토큰 저장소
///
/// 회원당 하나의 리프레시 토큰만 보관합니다. 같은 회원 ID로 다시 저장하면
/// 이전 값을 덮어씁니다 (마지막 쓰기 우선).
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 리프레시 토큰을 만료 시간과 함께 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - TTL이 0인 경우
    /// * `AppError::RedisError` - 저장 실패
    async fn save(&self, member_id: &str, refresh_token: &str, ttl_seconds: u64) -> AppResult<()>;

    /// 저장된 리프레시 토큰 원문을 조회합니다.
    async fn find(&self, member_id: &str) -> AppResult<Option<String>>;

    /// 저장된 리프레시 토큰을 삭제합니다. 없으면 아무 일도 하지 않습니다.
    async fn delete(&self, member_id: &str) -> AppResult<()>;
}

static REFRESH_TOKEN_REPOSITORY_INSTANCE: OnceCell<Arc<RefreshTokenRepository>> = OnceCell::new();

/// Redis 기반 리프레시 토큰 Repository
///
/// 토큰 문자열을 JSON으로 감싸지 않고 그대로 `SETEX`로 저장합니다.
/// 키 만료 시간은 토큰 자체의 만료 시간과 같습니다.
pub struct RefreshTokenRepository {
    redis: Arc<RedisClient>,
}

impl RefreshTokenRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    /// `ServiceLocator`에 등록된 `RedisClient`로 만든 싱글톤 인스턴스를 반환합니다.
    pub fn instance() -> Arc<Self> {
        REFRESH_TOKEN_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<RedisClient>())))
            .clone()
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn save(&self, member_id: &str, refresh_token: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            log::error!("리프레시 토큰 TTL이 0입니다: member_id={}", member_id);
            return Err(AppError::ValidationError("TTL cannot be zero".to_string()));
        }

        self.redis
            .set_string_with_expiry(&refresh_token_key(member_id), refresh_token, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::info!("리프레시 토큰 저장 완료: member_id={}, ttl={}초", member_id, ttl_seconds);
        Ok(())
    }

    async fn find(&self, member_id: &str) -> AppResult<Option<String>> {
        self.redis
            .get_string(&refresh_token_key(member_id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn delete(&self, member_id: &str) -> AppResult<()> {
        self.redis
            .del(&refresh_token_key(member_id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::info!("리프레시 토큰 삭제 완료: member_id={}", member_id);
        Ok(())
    }
}

#[async_trait]
impl Repository for RefreshTokenRepository {
    fn name(&self) -> &str {
        "RefreshTokenRepository"
    }

    fn collection_name(&self) -> &str {
        REFRESH_TOKEN_KEY_PREFIX
    }

    async fn init(&self) -> AppResult<()> {
        // 부팅 시점에 Redis 응답 여부만 확인
        self.redis
            .exists(&refresh_token_key("__init__"))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;
        Ok(())
    }
}

fn create_refresh_token_repository() -> Arc<dyn Repository> {
    RefreshTokenRepository::instance()
}

inventory::submit! {
    RepositoryRegistration {
        name: "refresh_token_repository",
        constructor: create_refresh_token_repository,
    }
}
