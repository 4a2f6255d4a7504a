//! 组件构造接口
//!
//! 注入时若键尚无实例，按注入参数构造组件

use crate::key::KeyPart;
use infrastructure_common::{Component, DependencyError, DependencyResult};

/// 可注入组件 trait
///
/// 注入路径在找不到实例时调用 [`Injectable::from_args`]，
/// 参数即注入时给出的键参数。
pub trait Injectable: Component + Sized {
    /// 由注入参数构造组件实例
    fn from_args(args: KeyArgs<'_>) -> DependencyResult<Self>;
}

/// 注入参数视图
///
/// 读取失败统一返回配置错误，携带组件类型名称。
#[derive(Debug, Clone, Copy)]
pub struct KeyArgs<'a> {
    owner: &'static str,
    parts: &'a [KeyPart],
}

impl<'a> KeyArgs<'a> {
    /// 为指定组件创建参数视图
    pub fn for_component<T: ?Sized + 'static>(parts: &'a [KeyPart]) -> Self {
        Self {
            owner: std::any::type_name::<T>(),
            parts,
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 原始参数
    pub fn parts(&self) -> &'a [KeyPart] {
        self.parts
    }

    /// 要求参数个数恰为 `expected`
    pub fn expect_len(&self, expected: usize) -> DependencyResult<()> {
        if self.parts.len() != expected {
            return Err(DependencyError::configuration(
                self.owner,
                format!("期望 {} 个注入参数, 实际 {}", expected, self.parts.len()),
            ));
        }
        Ok(())
    }

    /// 读取字符串参数
    pub fn str(&self, index: usize) -> DependencyResult<&'a str> {
        let part = self.get(index)?;
        part.as_str().ok_or_else(|| self.mistyped(index, part, "字符串"))
    }

    /// 读取整数参数
    pub fn int(&self, index: usize) -> DependencyResult<i64> {
        let part = self.get(index)?;
        part.as_int().ok_or_else(|| self.mistyped(index, part, "整数"))
    }

    /// 读取浮点参数
    pub fn float(&self, index: usize) -> DependencyResult<f64> {
        let part = self.get(index)?;
        part.as_float().ok_or_else(|| self.mistyped(index, part, "浮点数"))
    }

    fn get(&self, index: usize) -> DependencyResult<&'a KeyPart> {
        self.parts.get(index).ok_or_else(|| {
            DependencyError::configuration(self.owner, format!("缺少第 {} 个注入参数", index))
        })
    }

    fn mistyped(&self, index: usize, part: &KeyPart, expected: &str) -> DependencyError {
        DependencyError::configuration(
            self.owner,
            format!("第 {} 个注入参数 {} 应为{}", index, part, expected),
        )
    }
}
