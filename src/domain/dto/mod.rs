//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청/응답 본문과 매핑되는 구조체입니다.

pub mod members;

pub use members::*;
