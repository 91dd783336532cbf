//! 회원 요청 DTO
//!
//! 회원가입/로그인 요청 본문을 매핑하고 `validator`로 입력을 검증합니다.
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 회원가입 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// 로그인에 사용할 이메일
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 100, message = "이메일은 100자 이하여야 합니다")
    )]
    pub email: String,

    /// 평문 비밀번호. bcrypt 입력 한계인 72바이트를 넘을 수 없습니다.
    #[validate(length(min = 1, max = 72, message = "비밀번호는 1-72자 사이여야 합니다"))]
    pub password: String,

    /// 표시 이름
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,
}

/// 로그인 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}
