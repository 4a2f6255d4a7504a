//! register / inject 装饰器
//!
//! 作用于全局应用上下文的高阶函数，`#[register]` 与 `#[inject]` 宏展开后调用这里。

use crate::global::application_context;
use di_abstractions::{Injectable, KeyPart};
use infrastructure_common::{Component, DependencyError, DependencyResult};
use std::sync::Arc;

/// 注册装饰器
///
/// `args` 为装饰时给出的参数，`constructor` 以调用时参数执行原构造函数。
/// 同一键只构造一次，之后的调用直接返回已有实例。
///
/// ```
/// use di_impl::{register, Component, DependencyError};
///
/// #[derive(Debug)]
/// struct CacheService;
///
/// impl Component for CacheService {
///     fn name(&self) -> &'static str {
///         "CacheService"
///     }
/// }
///
/// let first = register::<CacheService, _, DependencyError>(&["doc".into()], || Ok(CacheService)).unwrap();
/// let second = register::<CacheService, _, DependencyError>(&["doc".into()], || Ok(CacheService)).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub fn register<T, F, E>(args: &[KeyPart], constructor: F) -> Result<Arc<T>, E>
where
    T: Component,
    F: FnOnce() -> Result<T, E>,
    E: From<DependencyError>,
{
    application_context().register_component(args, constructor)
}

/// 注入装饰器
///
/// 以类型名的蛇形形式作为宿主 `H` 上的注入点名称。
pub fn inject<H, T>(values: &[KeyPart]) -> DependencyResult<Arc<T>>
where
    H: ?Sized + 'static,
    T: Injectable,
{
    application_context().inject::<H, T>(None, values)
}

/// 注入装饰器，显式指定注入点名称
pub fn inject_as<H, T>(attribute: &str, values: &[KeyPart]) -> DependencyResult<Arc<T>>
where
    H: ?Sized + 'static,
    T: Injectable,
{
    application_context().inject::<H, T>(Some(attribute), values)
}
