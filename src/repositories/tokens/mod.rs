//! 리프레시 토큰 저장소
//!
//! `RT:<memberId>` 키에 리프레시 토큰 원문을 저장합니다.

pub mod refresh_token_repository;

pub use refresh_token_repository::*;
