//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义复合键、Bean 注册与解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`KeyBuilder`] / [`CompositeKey`] - 复合键构建
//! - [`BeanRegistry`] - Bean 注册表接口
//! - [`BeanResolver`] - 类型化解析
//! - [`Injectable`] - 按注入参数构造组件
//! - [`InjectionSite`] - 注入点记录

pub mod factory;
pub mod key;
pub mod registry;
pub mod resolver;
pub mod site;

pub use factory::*;
pub use key::*;
pub use registry::*;
pub use resolver::*;
pub use site::*;
