//! 复合键构建
//!
//! 由装饰参数（数字、字符串）按顺序构成的确定性键。
//! 不做跨类型归一化：`1` 与 `"1"`、`1` 与 `1.0` 都是不同的键。

use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use serde::{Serialize, Serializer};
use std::fmt;

/// 复合键的单个组成部分
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// 整数
    Int(i64),
    /// 浮点数（按位存储，不含 NaN）
    Float(u64),
    /// 字符串
    Str(String),
}

impl KeyPart {
    /// 创建浮点键，NaN 不可比较，视为非法参数
    pub fn float(value: f64) -> DependencyResult<Self> {
        if value.is_nan() {
            return Err(DependencyError::configuration("KeyPart", "NaN 不能作为键参数"));
        }
        Ok(Self::Float(value.to_bits()))
    }

    /// 字符串值
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// 整数值
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// 浮点值
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

macro_rules! impl_int_key_part {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for KeyPart {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_int_key_part!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for KeyPart {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl TryFrom<f64> for KeyPart {
    type Error = DependencyError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::float(value)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl Serialize for KeyPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(bits) => serializer.serialize_f64(f64::from_bits(*bits)),
            Self::Str(value) => serializer.serialize_str(value),
        }
    }
}

/// 复合键
///
/// 结构相等的两个键指向注册表中的同一个槽位。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompositeKey(Vec<KeyPart>);

impl CompositeKey {
    /// 由组成部分创建
    pub fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    /// 空键
    pub fn empty() -> Self {
        Self::default()
    }

    /// 组成部分
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<KeyPart>> for CompositeKey {
    fn from(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str(")")
    }
}

/// 复合键构建器
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    parts: Vec<KeyPart>,
}

impl KeyBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个参数
    pub fn push(mut self, part: impl Into<KeyPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    /// 追加一个浮点参数
    pub fn push_float(mut self, value: f64) -> DependencyResult<Self> {
        self.parts.push(KeyPart::float(value)?);
        Ok(self)
    }

    /// 追加多个参数
    pub fn extend<I>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = KeyPart>,
    {
        self.parts.extend(parts);
        self
    }

    /// 构建复合键
    pub fn build(self) -> CompositeKey {
        CompositeKey(self.parts)
    }

    /// 组件键：类型完整路径后接装饰参数
    ///
    /// `register` 与 `inject` 两条路径都通过这里成键，
    /// 相同参数必然落在同一槽位。
    pub fn component_key<T: ?Sized + 'static>(args: &[KeyPart]) -> CompositeKey {
        Self::new()
            .push(TypeInfo::of::<T>().module_path)
            .extend(args.iter().cloned())
            .build()
    }
}

/// 构建复合键
///
/// ```
/// use di_abstractions::{composite_key, KeyBuilder};
///
/// let key = composite_key!["users", 1];
/// assert_eq!(key, KeyBuilder::new().push("users").push(1).build());
/// ```
#[macro_export]
macro_rules! composite_key {
    ($($part:expr),* $(,)?) => {
        $crate::CompositeKey::new(vec![$($crate::KeyPart::from($part)),*])
    };
}
