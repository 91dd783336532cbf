//! # Core Framework Module
//!
//! 서비스 전반에서 공유하는 핵심 기능을 제공합니다.
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 인프라 인스턴스(`Database`, `RedisClient`) 보관
//! - **자동 레지스트리**: `inventory` 기반 리포지토리/서비스 등록과 부팅 시 초기화
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 JSON 에러 응답 자동 변환

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
