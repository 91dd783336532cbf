//! 테스트용 인메모리 저장소
//!
//! MongoDB/Redis 없이 서비스와 미들웨어를 검증할 때 사용합니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::members::Member;
use crate::repositories::members::MemberStore;
use crate::repositories::tokens::{refresh_token_key, RefreshTokenStore};

/// `RT:<memberId>` 키를 그대로 사용하는 리프레시 토큰 저장소
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    entries: Mutex<HashMap<String, String>>,
    lookups: Mutex<usize>,
}

impl InMemoryRefreshTokenStore {
    pub fn contains(&self, member_id: &str) -> bool {
        self.entries.lock().unwrap().contains_key(&refresh_token_key(member_id))
    }

    /// `find` 호출 횟수
    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn save(&self, member_id: &str, refresh_token: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Err(AppError::ValidationError("TTL cannot be zero".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(refresh_token_key(member_id), refresh_token.to_string());
        Ok(())
    }

    async fn find(&self, member_id: &str) -> AppResult<Option<String>> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self.entries.lock().unwrap().get(&refresh_token_key(member_id)).cloned())
    }

    async fn delete(&self, member_id: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(&refresh_token_key(member_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMemberStore {
    members: Mutex<Vec<Member>>,
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.members.lock().unwrap().iter().any(|m| m.email == email))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        Ok(self.members.lock().unwrap().iter().find(|m| m.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == Some(object_id))
            .cloned())
    }

    async fn save(&self, mut member: Member) -> AppResult<Member> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| m.email == member.email) {
            return Err(AppError::BadRequest("이미 존재하는 이메일입니다.".to_string()));
        }

        member.id = Some(ObjectId::new());
        members.push(member.clone());
        Ok(member)
    }
}
