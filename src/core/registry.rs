//! # Service Registry & Dependency Injection
//!
//! 애플리케이션 전역 싱글톤을 관리하는 서비스 로케이터입니다.
//!
//! ## 구성 요소
//!
//! - **인프라 인스턴스**: `Database`, `RedisClient` 처럼 외부 연결이 필요한 객체는
//!   부팅 시 `ServiceLocator::set()`으로 직접 등록합니다.
//! - **리포지토리/서비스**: 각 타입이 `OnceCell` 기반 `instance()`를 제공하고,
//!   `inventory::submit!`으로 생성자를 등록합니다. `initialize_all()`은 등록된
//!   모든 리포지토리를 먼저, 서비스를 나중에 생성하고 `init()`을 호출합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! // main.rs
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::initialize_all().await?;
//!
//! // 리포지토리 내부
//! let db = ServiceLocator::get::<Database>();
//! ```
//!
//! ## 등록 방법
//!
//! ```rust,ignore
//! fn create_member_repository() -> Arc<dyn Repository> {
//!     MemberRepository::instance()
//! }
//!
//! inventory::submit! {
//!     RepositoryRegistration {
//!         name: "member_repository",
//!         constructor: create_member_repository,
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::core::errors::AppResult;

/// 서비스 계층 컴포넌트 trait
///
/// 부팅 시 `initialize_all()`이 `init()`을 한 번 호출합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 로그에 표시할 서비스 이름
    fn name(&self) -> &str;

    /// 부팅 시 초기화 작업 (설정 검증 등)
    async fn init(&self) -> AppResult<()>;
}

/// 데이터 접근 계층 컴포넌트 trait
#[async_trait]
pub trait Repository: Send + Sync {
    /// 로그에 표시할 리포지토리 이름
    fn name(&self) -> &str;

    /// 저장소 이름 (MongoDB 컬렉션 또는 Redis 키 네임스페이스)
    fn collection_name(&self) -> &str;

    /// 부팅 시 초기화 작업 (인덱스 생성 등)
    async fn init(&self) -> AppResult<()>;
}

/// `inventory`로 수집되는 서비스 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Arc<dyn Service>,
}

/// `inventory`로 수집되는 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Arc<dyn Repository>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 타입 기반 싱글톤 저장소
///
/// 인스턴스 맵은 `RwLock`으로 보호되며, 생성자를 실행하는 동안에는
/// 어떤 락도 잡지 않습니다. 생성자 안에서 다시 `get()`을 호출해도 교착되지 않습니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 등록된 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// 부팅 시 `set()`으로 등록되지 않은 타입을 요청하면 패닉합니다.
    /// 이는 잘못된 초기화 순서를 나타내는 프로그래밍 오류입니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Some(instance) => instance,
            None => panic!(
                "Service not registered: {}. Register it with ServiceLocator::set() before use",
                std::any::type_name::<T>()
            ),
        }
    }

    /// 등록된 인스턴스를 반환하고, 없으면 `None`을 반환합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::info!("📦 인스턴스 등록: {}", type_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    fn extract_clean_type_name(type_name: &str) -> &str {
        match type_name.rfind("::") {
            Some(pos) => &type_name[pos + 2..],
            None => type_name,
        }
    }

    /// 등록된 모든 리포지토리와 서비스를 생성하고 초기화합니다.
    ///
    /// 리포지토리를 먼저 초기화한 뒤 서비스를 초기화합니다.
    ///
    /// # Errors
    ///
    /// 어느 하나의 `init()`이라도 실패하면 즉시 해당 에러를 반환합니다.
    pub async fn initialize_all() -> AppResult<()> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let repository = (registration.constructor)();
            repository.init().await?;
            log::info!(
                "  ✓ {} (저장소: {})",
                registration.name,
                repository.collection_name()
            );
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let service = (registration.constructor)();
            service.init().await?;
            log::info!("  ✓ {} ({})", registration.name, service.name());
            service_count += 1;
        }

        log::info!(
            "✅ 초기화 완료: 리포지토리 {}개, 서비스 {}개",
            repo_count,
            service_count
        );

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
