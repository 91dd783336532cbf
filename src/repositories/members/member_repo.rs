//! # 회원 리포지토리 구현
//!
//! 회원 엔티티의 데이터 액세스 계층입니다.
//! MongoDB `members` 컬렉션을 주 저장소로 사용하고, 프로필 조회 결과는 Redis에 잠시 캐싱합니다.
//!
//! ## 특징
//!
//! - **이메일 고유성**: 서비스 계층의 사전 확인과 함께 `email_unique` 인덱스로 보장
//! - **프로필 캐싱**: `member:<id>` 키에 비밀번호 해시를 뺀 `MemberResponse`만 저장,
//!   TTL은 `CacheConfig::member_ttl_seconds()`
//! - **캐시 장애 허용**: Redis 오류는 무시하고 MongoDB 결과를 사용

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use once_cell::sync::OnceCell;

use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::dto::members::MemberResponse;
use crate::domain::entities::members::Member;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_ERROR_CODE: i32 = 11000;

/// 회원 저장소
///
/// 서비스 계층은 이 trait에만 의존합니다.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// 이메일로 가입된 회원이 있는지 확인합니다.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// 이메일로 회원을 조회합니다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;

    /// 16진수 문자열 ID로 회원을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - ID 형식이 올바르지 않은 경우
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>>;

    /// 비밀번호 해시를 제외한 회원 프로필을 조회합니다.
    async fn find_profile_by_id(&self, id: &str) -> AppResult<Option<MemberResponse>> {
        Ok(self.find_by_id(id).await?.map(MemberResponse::from))
    }

    /// 새 회원을 저장하고, ID가 할당된 회원을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::BadRequest` - 같은 이메일이 이미 저장된 경우
    async fn save(&self, member: Member) -> AppResult<Member>;
}

static MEMBER_REPOSITORY_INSTANCE: OnceCell<Arc<MemberRepository>> = OnceCell::new();

/// MongoDB 기반 회원 Repository
pub struct MemberRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl MemberRepository {
    pub const COLLECTION_NAME: &'static str = "members";

    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    /// `ServiceLocator`에 등록된 `Database`/`RedisClient`로 만든 싱글톤 인스턴스를 반환합니다.
    pub fn instance() -> Arc<Self> {
        MEMBER_REPOSITORY_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    ServiceLocator::get::<Database>(),
                    ServiceLocator::get::<RedisClient>(),
                ))
            })
            .clone()
    }

    fn collection(&self) -> Collection<Member> {
        self.db.get_database().collection::<Member>(Self::COLLECTION_NAME)
    }

    fn cache_key(id: &str) -> String {
        format!("member:{}", id)
    }

    /// 회원 컬렉션 인덱스를 생성합니다.
    ///
    /// - `email_unique`: 이메일 고유 인덱스
    /// - `created_at_desc`: 가입일 역순 인덱스
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_ERROR_CODE
        }
        _ => false,
    }
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = self.collection()
            .count_documents(doc! { "email": email })
            .limit(1)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_profile_by_id(&self, id: &str) -> AppResult<Option<MemberResponse>> {
        let cache_key = Self::cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<MemberResponse>(&cache_key).await {
            return Ok(Some(cached));
        }

        let profile = self.find_by_id(id).await?.map(MemberResponse::from);

        if let Some(ref profile) = profile {
            if let Err(e) = self.redis
                .set_with_expiry(&cache_key, profile, CacheConfig::member_ttl_seconds())
                .await
            {
                log::warn!("회원 캐시 저장 실패: {}", e);
            }
        }

        Ok(profile)
    }

    async fn save(&self, mut member: Member) -> AppResult<Member> {
        let result = self.collection()
            .insert_one(&member)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::BadRequest("이미 존재하는 이메일입니다.".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 문서 ID가 ObjectId가 아닙니다".to_string())
        })?;
        member.id = Some(id);

        Ok(member)
    }
}

#[async_trait]
impl Repository for MemberRepository {
    fn name(&self) -> &str {
        "MemberRepository"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION_NAME
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

fn create_member_repository() -> Arc<dyn Repository> {
    MemberRepository::instance()
}

inventory::submit! {
    RepositoryRegistration {
        name: "member_repository",
        constructor: create_member_repository,
    }
}
