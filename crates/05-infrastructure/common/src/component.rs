//! 组件基础接口定义
//!
//! 提供所有可注入组件必须实现的标记 trait

use crate::metadata::TypeInfo;
use std::collections::HashMap;
use std::fmt::Debug;

/// 组件基础 trait
///
/// 只有实现此 trait 的类型才能被注册为 Bean 或被注入。
/// 除名称外不要求任何行为方法。
pub trait Component: Send + Sync + Debug + 'static {
    /// 组件名称
    fn name(&self) -> &'static str;
}

/// 组件描述符
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 组件名称
    pub name: String,
    /// 组件类型信息
    pub type_info: TypeInfo,
    /// 组件元数据
    pub metadata: HashMap<String, String>,
}

impl ComponentDescriptor {
    /// 创建新的组件描述符
    pub fn new<T: Component>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_info: TypeInfo::of::<T>(),
            metadata: HashMap::new(),
        }
    }

    /// 以类型短名称创建描述符
    pub fn of<T: Component>() -> Self {
        let type_info = TypeInfo::of::<T>();
        Self {
            name: type_info.name.clone(),
            type_info,
            metadata: HashMap::new(),
        }
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
