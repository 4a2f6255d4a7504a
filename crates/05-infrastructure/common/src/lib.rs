//! # Infrastructure Common
//!
//! 这个 crate 提供了 IoC 核心的公共 traits 和工具。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件标记 trait，实现它的类型才能参与注册与注入
//! - [`ComponentDescriptor`] - 组件描述符，供工具枚举所有组件
//! - [`TypeInfo`] - 类型元数据
//! - [`NamingConventions`] - 注入点命名约定
//! - [`ContainerConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 约定优于配置
//! - 进程级状态显式化，并提供重置入口

pub mod component;
pub mod configuration;
pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;

use std::sync::Arc;

/// 全局组件注册表
static GLOBAL_COMPONENT_REGISTRY: once_cell::sync::Lazy<Arc<dyn GlobalComponentRegistry>> =
    once_cell::sync::Lazy::new(|| Arc::new(InMemoryComponentRegistry::new()));

/// 全局组件注册表 trait
pub trait GlobalComponentRegistry: Send + Sync {
    /// 注册组件描述符
    fn register_component_descriptor(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<(), ComponentError>;

    /// 获取所有注册的组件描述符
    fn get_all_descriptors(&self) -> Vec<ComponentDescriptor>;

    /// 检查类型是否已声明为组件
    fn is_declared(&self, type_id: std::any::TypeId) -> bool {
        self.get_all_descriptors()
            .iter()
            .any(|descriptor| descriptor.type_info.id == type_id)
    }
}

/// 获取全局组件注册表
pub fn get_global_component_registry() -> Arc<dyn GlobalComponentRegistry> {
    Arc::clone(&GLOBAL_COMPONENT_REGISTRY)
}
