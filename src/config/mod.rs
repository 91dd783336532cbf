//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! `.env` 파일은 `main.rs`에서 `dotenv`로 먼저 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 비밀번호 해싱, 서버, 캐시, 요청 제한, CORS 설정
//! - [`auth_config`] - JWT 발급자, 서명 키, 토큰 만료 시간 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="member_auth"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # JWT
//! export JWT_ACCESS_SECRET="..."
//! export JWT_REFRESH_SECRET="..."
//!
//! # 보안
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
