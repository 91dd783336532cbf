//! # Domain Entities
//!
//! MongoDB에 영속화되는 도메인 엔티티입니다.

pub mod members;
