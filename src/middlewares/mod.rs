//! # Middlewares
//!
//! - [`auth_middleware`] - 액세스 토큰 인증과 만료 토큰 재발급 (`New-Access-Token`)

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
pub use auth_inner::NEW_ACCESS_TOKEN_HEADER;
