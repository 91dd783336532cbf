//! 회원 인증 서비스 백엔드
//!
//! 회원 가입, 로그인, 로그아웃을 제공하는 JWT 기반 인증 서비스입니다.
//!
//! # Features
//!
//! - **회원 관리**: 이메일 기반 회원 가입, bcrypt 비밀번호 해싱
//! - **JWT 인증**: HS512 서명 액세스 토큰(10분) / 리프레시 토큰(30일)
//! - **자동 재발급**: 만료된 액세스 토큰은 Redis `RT:<memberId>`의 리프레시 토큰으로
//!   재발급되어 `New-Access-Token` 응답 헤더로 전달
//! - **MongoDB**: 회원 데이터 영구 저장
//! - **Redis**: 리프레시 토큰 저장 및 회원 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  AuthMiddleware │ ← 토큰 검증, 재발급
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
