//! # Domain Layer
//!
//! 회원 인증 도메인의 엔티티, DTO, 모델을 정의합니다.
//!
//! ```text
//! domain/
//! ├── entities/   ← MongoDB 문서 (Member)
//! ├── dto/        ← HTTP 요청/응답 본문
//! └── models/     ← 토큰 클레임, 요청 주체
//! ```

pub mod entities;
pub mod dto;
pub mod models;
