//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델과 값 객체입니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB에 저장되는 문서 (`Member`)
//! - **Models** (`./`): 요청 단위로 만들어지는 값 (`TokenClaims`, `AuthenticatedMember`)
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── auth/     ← 요청 주체와 인증 모드
//! └── token/    ← JWT 클레임, 토큰 종류, 검증 결과
//! ```

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
