//! Member Entity Implementation
//!
//! 회원 엔티티입니다. MongoDB `members` 컬렉션의 문서와 1:1로 매핑됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 회원 엔티티
///
/// 회원가입 시 생성되고, 로그인/로그아웃/프로필 조회 시 읽힙니다.
/// 이메일은 회원마다 하나만 존재합니다 (`email` 고유 인덱스).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 이메일 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 표시 이름
    pub name: String,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Member {
    /// 저장 전의 새 회원을 생성합니다. `id`는 저장 시 할당됩니다.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// 회원 ID를 16진수 문자열로 반환합니다.
    ///
    /// 토큰의 `sub`/`id` 클레임과 `RT:<memberId>` 키에 사용되는 값입니다.
    /// 아직 저장되지 않은 회원이면 `None`입니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_has_no_id() {
        let member = Member::new(
            "kim@test.com".to_string(),
            "$2b$04$hash".to_string(),
            "김철수".to_string(),
        );

        assert!(member.id.is_none());
        assert!(member.id_string().is_none());
        assert_eq!(member.created_at, member.updated_at);
    }

    #[test]
    fn test_id_string_is_hex() {
        let id = ObjectId::new();
        let mut member = Member::new(
            "kim@test.com".to_string(),
            "$2b$04$hash".to_string(),
            "김철수".to_string(),
        );
        member.id = Some(id);

        assert_eq!(member.id_string(), Some(id.to_hex()));
    }

    #[test]
    fn test_unsaved_member_serializes_without_id() {
        let member = Member::new(
            "kim@test.com".to_string(),
            "$2b$04$hash".to_string(),
            "김철수".to_string(),
        );
        let document = mongodb::bson::to_document(&member).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("email").unwrap(), "kim@test.com");
    }
}
