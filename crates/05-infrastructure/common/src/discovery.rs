//! 组件发现机制
//!
//! 组件宏在程序启动时把描述符登记到全局组件注册表，
//! 工具与严格模式据此枚举、校验组件。

use crate::{ComponentDescriptor, ComponentError, GlobalComponentRegistry};
use parking_lot::RwLock;
use std::any::TypeId;
use tracing::debug;

/// 内存中的组件注册表实现
#[derive(Debug, Default)]
pub struct InMemoryComponentRegistry {
    descriptors: RwLock<Vec<ComponentDescriptor>>,
}

impl InMemoryComponentRegistry {
    /// 创建新的内存注册表
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobalComponentRegistry for InMemoryComponentRegistry {
    fn register_component_descriptor(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<(), ComponentError> {
        if descriptor.name.trim().is_empty() {
            return Err(ComponentError::InvalidMetadata {
                message: format!("组件名称为空: {}", descriptor.type_info),
            });
        }

        let mut descriptors = self.descriptors.write();
        if descriptors
            .iter()
            .any(|existing| existing.type_info.id == descriptor.type_info.id)
        {
            debug!("组件已声明，忽略重复登记: {}", descriptor.name);
            return Ok(());
        }

        debug!("声明组件: {} ({})", descriptor.name, descriptor.type_info);
        descriptors.push(descriptor);
        Ok(())
    }

    fn get_all_descriptors(&self) -> Vec<ComponentDescriptor> {
        self.descriptors.read().clone()
    }

    fn is_declared(&self, type_id: TypeId) -> bool {
        self.descriptors
            .read()
            .iter()
            .any(|descriptor| descriptor.type_info.id == type_id)
    }
}
