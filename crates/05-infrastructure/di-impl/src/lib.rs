//! # 依赖注入具体实现
//!
//! 提供应用上下文（Bean 注册表）、register / inject 装饰器、
//! 类级单例访问器与启动器。
//!
//! ## 使用方式
//!
//! ```
//! use di_impl::{application_context, register, BeanRegistry, Component, DependencyError, Singleton};
//!
//! #[derive(Debug)]
//! struct ColorRepository {
//!     palette: &'static str,
//! }
//!
//! impl Component for ColorRepository {
//!     fn name(&self) -> &'static str {
//!         "ColorRepository"
//!     }
//! }
//!
//! let created = register::<ColorRepository, _, DependencyError>(&[], || {
//!     Ok(ColorRepository { palette: "warm" })
//! })
//! .unwrap();
//!
//! assert!(std::sync::Arc::ptr_eq(&created, &ColorRepository::instance().unwrap()));
//! assert!(application_context().len() >= 1);
//! ```

pub mod bootstrap;
pub mod class_property;
pub mod context;
pub mod decorators;
pub mod global;
pub mod wiring;

pub use bootstrap::ContextBootstrapper;
pub use class_property::{ClassProperty, Singleton};
pub use context::{ApplicationContext, BeanSnapshot, ContextSnapshot, SiteSnapshot};
pub use decorators::{inject, inject_as, register};
pub use global::{
    application_context, reset_application_context, reset_application_context_with,
    set_application_context,
};
pub use wiring::{
    declare_injection_site, declared_injection_sites, wire_declared_sites, SiteDeclaration,
};

// 宏展开代码经由本 crate 引用这些类型
pub use di_abstractions::*;
pub use infrastructure_common::{
    get_global_component_registry, Component, ComponentDescriptor, ConfigError, ContainerConfig,
    DependencyError, DependencyResult, GlobalComponentRegistry, InfrastructureError,
    NamingConventions, TypeInfo,
};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
