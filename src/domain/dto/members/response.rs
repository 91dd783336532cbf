use serde::{Deserialize, Serialize};

use crate::domain::entities::members::Member;

/// 단순 결과 메시지 응답 DTO
///
/// 회원가입(`회원가입 성공`), 로그아웃(`로그아웃 성공`) 결과에 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// 회원 정보 응답 DTO
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    /// RFC 3339 형식의 생성 시간
    pub created_at: String,
    /// RFC 3339 형식의 수정 시간
    pub updated_at: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        let Member {
            id,
            email,
            name,
            created_at,
            updated_at,
            ..
        } = member;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            name,
            created_at: created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_member_response_hides_password_hash() {
        let mut member = Member::new(
            "kim@test.com".to_string(),
            "$2b$04$secret-hash".to_string(),
            "김철수".to_string(),
        );
        member.id = Some(ObjectId::new());

        let json = serde_json::to_string(&MemberResponse::from(member)).unwrap();

        assert!(json.contains("kim@test.com"));
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_login_response_is_bearer() {
        let response = LoginResponse::new("access".to_string(), "refresh".to_string(), 600);

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 600);
    }
}
