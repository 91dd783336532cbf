//! 캐싱 계층 모듈
//!
//! Redis 연결을 제공합니다. 리프레시 토큰 저장(`RT:<memberId>`)과
//! 회원 조회 캐시(`member:<memberId>`)가 같은 클라이언트를 사용합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let redis = RedisClient::new().await?;
//! redis.set_string_with_expiry("RT:650f1c...", &refresh_token, 2_592_000).await?;
//! let stored = redis.get_string("RT:650f1c...").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
