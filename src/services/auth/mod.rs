//! 인증 서비스 모듈
//!
//! JWT 액세스/리프레시 토큰 발급, 검증, 재발급을 제공합니다.

pub mod token_service;

pub use token_service::*;
