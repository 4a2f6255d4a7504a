//! 注入点

use crate::key::CompositeKey;
use infrastructure_common::TypeInfo;

/// 注入点：接收实例的（宿主类型, 属性名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionSite {
    /// 宿主类型
    pub host: TypeInfo,
    /// 属性名
    pub attribute: String,
    /// 解析所用的复合键
    pub key: CompositeKey,
}

impl InjectionSite {
    pub fn new(host: TypeInfo, attribute: impl Into<String>, key: CompositeKey) -> Self {
        Self {
            host,
            attribute: attribute.into(),
            key,
        }
    }

    /// 是否为同一宿主上的同名属性
    pub fn same_slot(&self, other: &InjectionSite) -> bool {
        self.host == other.host && self.attribute == other.attribute
    }
}

impl std::fmt::Display for InjectionSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.host.short_name(), self.attribute)
    }
}
