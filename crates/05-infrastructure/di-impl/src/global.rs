//! 进程级应用上下文
//!
//! 首次访问时惰性创建，进程（或温容器）存续期间不销毁。
//! 测试通过 [`reset_application_context`] 或 [`set_application_context`] 隔离。

use crate::context::ApplicationContext;
use infrastructure_common::ContainerConfig;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

// 唯一的全局上下文槽位，首次访问时线程安全地创建
static APPLICATION_CONTEXT: Lazy<RwLock<Arc<ApplicationContext>>> = Lazy::new(|| {
    info!("初始化全局应用上下文");
    RwLock::new(Arc::new(ApplicationContext::new()))
});

/// 获取当前的全局应用上下文
pub fn application_context() -> Arc<ApplicationContext> {
    APPLICATION_CONTEXT.read().clone()
}

/// 替换全局应用上下文，返回之前的上下文
pub fn set_application_context(context: Arc<ApplicationContext>) -> Arc<ApplicationContext> {
    debug!("安装应用上下文: {}", context.id());
    std::mem::replace(&mut *APPLICATION_CONTEXT.write(), context)
}

/// 以默认配置的空上下文替换全局上下文，返回之前的上下文
pub fn reset_application_context() -> Arc<ApplicationContext> {
    reset_application_context_with(ContainerConfig::default())
}

/// 以指定配置的空上下文替换全局上下文，返回之前的上下文
pub fn reset_application_context_with(config: ContainerConfig) -> Arc<ApplicationContext> {
    let mut slot = APPLICATION_CONTEXT.write();
    let fresh = Arc::new(ApplicationContext::with_config(config));
    info!("重置全局应用上下文: {} -> {}", slot.id(), fresh.id());
    std::mem::replace(&mut *slot, fresh)
}

impl ApplicationContext {
    /// 把本上下文安装为全局上下文后执行处理函数
    ///
    /// 无服务器调用的入口：同一温容器内的后续调用共享已创建的组件。
    pub fn invoke<F, R>(self: &Arc<Self>, handler: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !Arc::ptr_eq(self, &application_context()) {
            set_application_context(self.clone());
        }
        debug!("在应用上下文 {} 中执行处理函数", self.id());
        handler()
    }
}
