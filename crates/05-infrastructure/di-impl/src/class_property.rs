//! 类级属性
//!
//! 以类型本身而非实例作为接收者求值的只读属性，
//! 用于实现 `T::instance()` 单例访问器。

use crate::global::application_context;
use infrastructure_common::{Component, DependencyResult, TypeInfo};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// 类级属性
///
/// 读取时以拥有者 `O` 的类型信息调用 getter，不需要 `O` 的任何实例。
pub struct ClassProperty<O: ?Sized, V> {
    getter: fn(&TypeInfo) -> V,
    _owner: PhantomData<fn(&O)>,
}

impl<O: ?Sized + 'static, V> ClassProperty<O, V> {
    /// 创建类级属性
    pub const fn new(getter: fn(&TypeInfo) -> V) -> Self {
        Self {
            getter,
            _owner: PhantomData,
        }
    }

    /// 读取属性
    pub fn get(&self) -> V {
        (self.getter)(&TypeInfo::of::<O>())
    }
}

/// 单例访问器
///
/// 对所有组件自动实现：`CacheService::instance()` 返回注册表中
/// 绑定给该类型的实例。
pub trait Singleton: Component + Sized {
    /// 类级单例访问器
    fn instance() -> DependencyResult<Arc<Self>> {
        ClassProperty::<Self, _>::new(resolve_instance::<Self>).get()
    }
}

impl<T: Component> Singleton for T {}

fn resolve_instance<T: Component>(owner: &TypeInfo) -> DependencyResult<Arc<T>> {
    trace!("读取类级单例访问器: {}", owner);
    application_context().instance::<T>()
}
