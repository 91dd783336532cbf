//! # Application Error Handling
//!
//! 회원 인증 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 계층은 `AppError`를 반환하고, 핸들러에서는 `actix_web::ResponseError`
//! 구현을 통해 자동으로 JSON 에러 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 요청 DTO 검증 실패 |
//! | `BadRequest` | 400 Bad Request | 중복 이메일, 리프레시 토큰 없음 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 인증 정보 없음 |
//! | `NotFound` | 404 Not Found | 회원 정보 없음 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | Redis 오류 |
//! | `InternalError` | 500 Internal Server Error | 해싱/서명 등 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "이미 존재하는 이메일입니다." }
//! ```
//!
//! 클라이언트에 그대로 노출되는 도메인 에러(`BadRequest`, `AuthenticationError`,
//! `NotFound`)는 접두어 없이 메시지만 내려갑니다.

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 카테고리
///
/// ### 1. 인프라 계층 에러
/// - `DatabaseError`: MongoDB 연산 실패
/// - `RedisError`: 리프레시 토큰 저장소/캐시 연산 실패
///
/// ### 2. 비즈니스 계층 에러
/// - `ValidationError`: 입력값 검증 실패
/// - `BadRequest`: 비즈니스 규칙 위반 (중복 가입, 이미 로그아웃된 회원)
/// - `NotFound`: 요청된 회원이 존재하지 않음
///
/// ### 3. 보안 계층 에러
/// - `AuthenticationError`: 잘못된 로그인 정보, 유효하지 않은 토큰
///
/// ### 4. 시스템 계층 에러
/// - `InternalError`: 예상하지 못한 시스템 오류
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(doc! { "email": email }).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // Redis 에러 변환
/// redis_client.get_string("RT:650f...").await
///     .map_err(|e| AppError::RedisError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// 연결 실패, 쿼리 실패, 인덱스 생성 실패 등 MongoDB 연산 중 발생하는 오류입니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    ///
    /// `validator`로 검증한 요청 DTO가 형식 요구사항을 만족하지 않을 때 발생합니다.
    ///
    /// # 예제
    /// ```rust,ignore
    /// payload.validate()
    ///     .map_err(|e| AppError::ValidationError(e.to_string()))?;
    /// ```
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 잘못된 요청 에러
    ///
    /// 형식은 올바르지만 현재 상태에서 처리할 수 없는 요청입니다.
    /// 메시지는 그대로 클라이언트에 전달됩니다.
    ///
    /// # 발생 시나리오
    /// - 이미 가입된 이메일로 회원가입 시도
    /// - 리프레시 토큰이 없는 상태에서 로그아웃 시도
    #[error("{0}")]
    BadRequest(String),

    /// 리소스 찾을 수 없음 에러
    #[error("{0}")]
    NotFound(String),

    /// 인증 실패 에러
    ///
    /// 사용자의 신원을 확인할 수 없을 때 발생합니다.
    /// 401 Unauthorized로 응답됩니다.
    ///
    /// # 발생 시나리오
    /// - 존재하지 않는 이메일 또는 틀린 비밀번호
    /// - 보호된 엔드포인트에 인증 정보 없이 접근
    #[error("{0}")]
    AuthenticationError(String),

    /// 내부 서버 에러
    ///
    /// # 예제
    /// ```rust,ignore
    /// let hash = bcrypt::hash(&password, cost)
    ///     .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
    /// ```
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에 원인을 남기고, 클라이언트에는 같은 형식의
    /// `{"error": ...}` 본문을 돌려줍니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 중 서버 오류 발생: {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let header_value = HeaderValue::from_str(&token)
///     .context("재발급 토큰 헤더 생성 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
