//! # Authentication Configuration Module
//!
//! JWT 토큰 발급/검증에 필요한 설정을 관리합니다.
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명됩니다.
//! 한쪽 키가 노출되어도 다른 종류의 토큰을 위조할 수 없습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_ISSUER="member-auth-service"
//! export JWT_ACCESS_SECRET="access-token-signing-key"
//! export JWT_REFRESH_SECRET="refresh-token-signing-key"
//! export JWT_ACCESS_EXPIRATION_MINUTES="10"
//! export JWT_REFRESH_EXPIRATION_DAYS="30"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, JwtSettings};
//!
//! let minutes = JwtConfig::access_expiration_minutes();
//! let settings = JwtSettings::from_env();
//! ```

use std::env;

/// 토큰 발급자 기본값
pub const DEFAULT_ISSUER: &str = "member-auth-service";

/// 액세스 토큰 기본 만료 시간 (분)
pub const DEFAULT_ACCESS_EXPIRATION_MINUTES: i64 = 10;

/// 리프레시 토큰 기본 만료 시간 (일)
pub const DEFAULT_REFRESH_EXPIRATION_DAYS: i64 = 30;

/// JSON Web Token (JWT) 관련 설정을 환경 변수에서 읽는 구조체
///
/// ## 권장 설정값
///
/// - **액세스 토큰**: 10분. 매 요청마다 검증되는 짧은 수명 자격 증명
/// - **리프레시 토큰**: 30일. Redis에 저장되어 로그아웃 시 폐기됨
pub struct JwtConfig;

impl JwtConfig {
    /// 토큰의 `iss` 클레임에 들어갈 발급자를 반환합니다.
    ///
    /// 검증 시 발급자가 다르면 유효하지 않은 토큰으로 취급합니다.
    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string())
    }

    /// 액세스 토큰 서명 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 없으면 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 64
    /// ```
    pub fn access_secret() -> String {
        env::var("JWT_ACCESS_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_ACCESS_SECRET not set, using default (not secure for production!)");
            "dev-access-token-secret-change-me".to_string()
        })
    }

    /// 리프레시 토큰 서명 비밀키를 반환합니다.
    pub fn refresh_secret() -> String {
        env::var("JWT_REFRESH_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_REFRESH_SECRET not set, using default (not secure for production!)");
            "dev-refresh-token-secret-change-me".to_string()
        })
    }

    /// 액세스 토큰 만료 시간을 분 단위로 반환합니다.
    ///
    /// # 기본값
    ///
    /// 10분. 0 이하이거나 숫자가 아니면 기본값을 사용합니다.
    pub fn access_expiration_minutes() -> i64 {
        parse_positive(
            env::var("JWT_ACCESS_EXPIRATION_MINUTES").ok().as_deref(),
            DEFAULT_ACCESS_EXPIRATION_MINUTES,
        )
    }

    /// 리프레시 토큰 만료 시간을 일 단위로 반환합니다.
    ///
    /// Redis에 저장되는 `RT:<memberId>` 키의 만료 시간도 이 값을 따릅니다.
    ///
    /// # 기본값
    ///
    /// 30일
    pub fn refresh_expiration_days() -> i64 {
        parse_positive(
            env::var("JWT_REFRESH_EXPIRATION_DAYS").ok().as_deref(),
            DEFAULT_REFRESH_EXPIRATION_DAYS,
        )
    }
}

/// 토큰 서비스가 사용하는 JWT 설정 스냅샷
///
/// 부팅 시 한 번 `from_env()`로 만들고, 테스트에서는 직접 값을 채워 사용합니다.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub issuer: String,
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl JwtSettings {
    /// 환경 변수에서 JWT 설정을 읽어옵니다.
    pub fn from_env() -> Self {
        Self {
            issuer: JwtConfig::issuer(),
            access_secret: JwtConfig::access_secret(),
            refresh_secret: JwtConfig::refresh_secret(),
            access_ttl_seconds: lifetime_seconds(
                JwtConfig::access_expiration_minutes(),
                SECONDS_PER_MINUTE,
                DEFAULT_ACCESS_EXPIRATION_MINUTES,
            ),
            refresh_ttl_seconds: lifetime_seconds(
                JwtConfig::refresh_expiration_days(),
                SECONDS_PER_DAY,
                DEFAULT_REFRESH_EXPIRATION_DAYS,
            ),
        }
    }
}

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// 토큰 수명 상한 (100년). `iat + ttl`이 i64 범위를 넘지 않도록 제한합니다.
const MAX_LIFETIME_SECONDS: i64 = 100 * 365 * SECONDS_PER_DAY;

/// 단위 값을 초로 변환합니다. 상한을 넘으면 경고 후 기본값을 사용합니다.
fn lifetime_seconds(value: i64, unit_seconds: i64, default: i64) -> i64 {
    match value.checked_mul(unit_seconds) {
        Some(seconds) if seconds <= MAX_LIFETIME_SECONDS => seconds,
        _ => {
            log::warn!(
                "토큰 수명 {} x {}초가 허용 범위를 넘어 기본값 {}을 사용합니다",
                value,
                unit_seconds,
                default
            );
            default * unit_seconds
        }
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
