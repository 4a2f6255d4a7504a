//! 类型化解析
//!
//! 在 [`BeanRegistry`] 之上提供按具体类型注册与解析的能力

use crate::key::CompositeKey;
use crate::registry::{Bean, BeanRegistry};
use infrastructure_common::{DependencyError, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 类型化解析器 trait
///
/// 对所有注册表自动实现。
pub trait BeanResolver: BeanRegistry {
    /// 按类型解析组件
    fn resolve_as<T>(&self, key: &CompositeKey) -> DependencyResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast_bean(key, self.resolve(key)?)
    }

    /// 按类型注册组件
    ///
    /// 构造函数的错误原样返回；键已被其他类型占用时返回 `TypeMismatch`。
    fn register_as<T, F, E>(&self, key: CompositeKey, factory: F) -> Result<Arc<T>, E>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, E>,
        E: From<DependencyError>,
    {
        let bean = self.register(key.clone(), || factory().map(|value| Arc::new(value) as Bean))?;
        downcast_bean(&key, bean).map_err(E::from)
    }
}

impl<R: BeanRegistry + ?Sized> BeanResolver for R {}

/// 将实例转换为具体类型
pub fn downcast_bean<T>(key: &CompositeKey, bean: Bean) -> DependencyResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    bean.downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
}
