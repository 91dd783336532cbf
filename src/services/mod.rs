//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 각 서비스는 `instance()`로 얻는 싱글톤이며,
//! 부팅 시 `ServiceLocator::initialize_all()`이 초기화합니다.
//!
//! - [`auth`] - `TokenService`: JWT 발급/검증/재발급
//! - [`members`] - `MemberService`: 회원가입, 로그인, 로그아웃, 내 정보

pub mod auth;
pub mod members;
