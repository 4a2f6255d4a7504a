//! Bean 注册表抽象接口

use crate::key::CompositeKey;
use infrastructure_common::DependencyResult;
use std::any::Any;
use std::sync::Arc;

/// 注册表中保存的组件实例
pub type Bean = Arc<dyn Any + Send + Sync>;

/// Bean 注册表 trait
///
/// 复合键到组件实例的映射，每个键至多对应一个实例。
/// 注册采用首个写入者胜出：已存在的键永远返回最初的实例，
/// 覆盖只能通过显式的 [`BeanRegistry::replace`]。
pub trait BeanRegistry: Send + Sync {
    /// 注册组件
    ///
    /// 键不存在时调用一次 `factory` 并保存结果；键已存在时直接返回已保存的实例，
    /// 不调用 `factory`。`factory` 的错误原样返回，键保持未注册，可再次尝试。
    fn register<F, E>(&self, key: CompositeKey, factory: F) -> Result<Bean, E>
    where
        F: FnOnce() -> Result<Bean, E>;

    /// 解析组件，键从未注册时返回 `BeanNotFound`
    fn resolve(&self, key: &CompositeKey) -> DependencyResult<Bean>;

    /// 显式覆盖，返回被替换的实例
    fn replace(&self, key: CompositeKey, bean: Bean) -> Option<Bean>;

    /// 检查键是否已注册
    fn contains(&self, key: &CompositeKey) -> bool;

    /// 所有已注册的键
    fn keys(&self) -> Vec<CompositeKey>;

    /// 所有已注册的实例（诊断用）
    fn all(&self) -> Vec<Bean>;

    /// 已注册实例数量
    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空注册表（测试隔离用的重置入口）
    fn clear(&self);
}
