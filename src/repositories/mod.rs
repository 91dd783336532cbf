//! # Repository Layer
//!
//! 데이터 접근 계층입니다. 서비스는 `MemberStore`, `RefreshTokenStore` trait에만
//! 의존하고, 실제 구현은 MongoDB/Redis 리포지토리가 담당합니다.
//!
//! ```text
//! repositories/
//! ├── members/   ← MemberRepository (MongoDB `members` + Redis 캐시)
//! └── tokens/    ← RefreshTokenRepository (Redis `RT:<memberId>`)
//! ```

pub mod members;
pub mod tokens;

#[cfg(test)]
pub(crate) mod testing;
