//! component-macros 集成测试：宏展开代码与全局应用上下文的协作

use component_macros::{inject, register, Component};
use di_impl::{
    application_context, declared_injection_sites, get_global_component_registry,
    reset_application_context, set_application_context, ApplicationContext, BeanRegistry,
    Component, ContainerConfig, ContextBootstrapper, DependencyResult, Injectable, KeyArgs,
    Singleton,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// 所有用例共享进程级上下文，串行执行
static GLOBAL: Mutex<()> = parking_lot::const_mutex(());

static CACHE_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

#[component_macros::component]
#[derive(Debug)]
pub struct CacheService {
    region: &'static str,
}

impl CacheService {
    #[register]
    pub fn new() -> Self {
        CACHE_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Self { region: "default" }
    }
}

impl Injectable for CacheService {
    fn from_args(args: KeyArgs<'_>) -> DependencyResult<Self> {
        args.expect_len(0)?;
        CACHE_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Ok(Self { region: "default" })
    }
}

#[derive(Debug, Component)]
#[component(name = "mysql", description = "MySQL 仓储")]
pub struct MySqlRepository {
    table: String,
}

impl MySqlRepository {
    /// 用户表仓储
    #[register("users")]
    pub fn users() -> Self {
        Self {
            table: "users".to_string(),
        }
    }

    #[register("orders")]
    pub fn orders() -> anyhow::Result<Self> {
        Ok(Self {
            table: "orders".to_string(),
        })
    }

    #[register("audit")]
    pub fn audit(available: bool) -> anyhow::Result<Self> {
        if !available {
            anyhow::bail!("审计库不可用");
        }
        Ok(Self {
            table: "audit".to_string(),
        })
    }
}

impl Injectable for MySqlRepository {
    fn from_args(args: KeyArgs<'_>) -> DependencyResult<Self> {
        args.expect_len(1)?;
        Ok(Self {
            table: args.str(0)?.to_string(),
        })
    }
}

#[derive(Debug, Component)]
pub struct PricingService {
    currency: String,
    rate: f64,
}

impl PricingService {
    #[register("EUR", 0.5)]
    pub fn euro(rate: f64) -> Self {
        Self {
            currency: "EUR".to_string(),
            rate,
        }
    }
}

/// 未经组件宏声明的组件
#[derive(Debug)]
pub struct AdHocService;

impl Component for AdHocService {
    fn name(&self) -> &'static str {
        "AdHocService"
    }
}

impl AdHocService {
    #[register]
    pub fn new() -> Self {
        Self
    }
}

#[inject(CacheService)]
pub struct OrderController;

#[inject(CacheService)]
#[inject(MySqlRepository, "users", name = "users")]
pub struct UserController;

#[test]
fn test_register_macro_constructs_once() {
    let _guard = GLOBAL.lock();
    reset_application_context();
    let before = CACHE_CONSTRUCTIONS.load(Ordering::SeqCst);

    let first = CacheService::new().unwrap();
    let second = CacheService::new().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.region, "default");
    assert_eq!(CACHE_CONSTRUCTIONS.load(Ordering::SeqCst), before + 1);
}

#[test]
fn test_cache_singleton_shared_by_controllers() {
    let _guard = GLOBAL.lock();
    reset_application_context();

    let registered = CacheService::new().unwrap();
    let for_orders = OrderController::cache_service().unwrap();
    let for_users = UserController::cache_service().unwrap();
    let accessor = CacheService::instance().unwrap();

    assert!(Arc::ptr_eq(&registered, &for_orders));
    assert!(Arc::ptr_eq(&for_orders, &for_users));
    assert!(Arc::ptr_eq(&for_users, &accessor));
    assert_eq!(application_context().len(), 1);
}

#[test]
fn test_repositories_keyed_by_table() {
    let _guard = GLOBAL.lock();
    reset_application_context();

    let users = MySqlRepository::users().unwrap();
    let orders = MySqlRepository::orders().unwrap();
    let injected = UserController::users().unwrap();

    assert!(!Arc::ptr_eq(&users, &orders));
    assert!(Arc::ptr_eq(&users, &injected));
    assert_eq!(users.table, "users");
    assert_eq!(orders.table, "orders");
    assert_eq!(users.name(), "mysql");
    assert!(Arc::ptr_eq(&MySqlRepository::instance().unwrap(), &injected));
}

#[test]
fn test_failed_constructor_propagates_and_retries() {
    let _guard = GLOBAL.lock();
    reset_application_context();

    let err = MySqlRepository::audit(false).unwrap_err();
    assert_eq!(err.to_string(), "审计库不可用");
    assert!(application_context().is_empty());

    let audit = MySqlRepository::audit(true).unwrap();
    assert_eq!(audit.table, "audit");
}

#[test]
fn test_float_key_argument() {
    let _guard = GLOBAL.lock();
    reset_application_context();

    let first = PricingService::euro(1.1).unwrap();
    let second = PricingService::euro(2.2).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.currency, "EUR");
    assert_eq!(first.rate, 1.1);

    let json = application_context().snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["beans"][0]["key"][1], "EUR");
    assert_eq!(value["beans"][0]["key"][2], 0.5);
}

#[test]
fn test_components_are_declared_at_startup() {
    let descriptors = get_global_component_registry().get_all_descriptors();

    let mysql = descriptors
        .iter()
        .find(|descriptor| descriptor.name == "mysql")
        .unwrap();
    assert_eq!(
        mysql.metadata.get("description").map(String::as_str),
        Some("MySQL 仓储")
    );
    assert!(descriptors.iter().any(|descriptor| descriptor.name == "CacheService"));
    assert!(descriptors.iter().any(|descriptor| descriptor.name == "PricingService"));
    assert!(!descriptors.iter().any(|descriptor| descriptor.name == "AdHocService"));
}

#[test]
fn test_strict_mode_rejects_undeclared_components() {
    let _guard = GLOBAL.lock();
    let strict = ContainerConfig {
        require_declared_components: true,
        ..ContainerConfig::default()
    };
    set_application_context(Arc::new(ApplicationContext::with_config(strict)));

    assert!(CacheService::new().is_ok());
    assert!(AdHocService::new().unwrap_err().is_configuration());

    reset_application_context();
    assert!(AdHocService::new().is_ok());
}

#[test]
fn test_bootstrap_wires_declared_sites() {
    let _guard = GLOBAL.lock();

    let sites = declared_injection_sites();
    assert_eq!(sites.len(), 3);
    assert!(sites
        .iter()
        .any(|site| site.host.ends_with("::UserController") && site.attribute == "users"));

    let context = ContextBootstrapper::new().bootstrap().unwrap();

    assert_eq!(context.len(), 2);
    assert_eq!(context.injection_sites().len(), 3);
    assert!(Arc::ptr_eq(
        &OrderController::cache_service().unwrap(),
        &CacheService::instance().unwrap()
    ));
}
