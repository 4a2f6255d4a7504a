//! 应用上下文启动器

use crate::context::ApplicationContext;
use crate::global::set_application_context;
use crate::wiring::wire_declared_sites;
use infrastructure_common::{ContainerConfig, InfrastructureError};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 应用上下文启动器
///
/// 使用建造者模式组装配置，创建上下文并安装为全局上下文。
#[derive(Debug, Clone, Default)]
pub struct ContextBootstrapper {
    config: ContainerConfig,
    logging_enabled: bool,
}

impl ContextBootstrapper {
    /// 使用默认配置创建启动器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `config/ioc.*` 与 `IOC_` 环境变量加载配置
    pub fn from_environment() -> Result<Self, InfrastructureError> {
        Ok(Self::new().with_config(ContainerConfig::load()?))
    }

    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 是否初始化日志系统，默认不初始化
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 启动
    ///
    /// 开启 `eager_injection` 时会解析所有已声明的注入点，
    /// 任何一个失败都会中止启动，全局上下文保持为启动前的上下文。
    pub fn bootstrap(self) -> Result<Arc<ApplicationContext>, InfrastructureError> {
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        let context = Arc::new(ApplicationContext::with_config(self.config.clone()));
        let previous = set_application_context(context.clone());

        if self.config.eager_injection {
            match wire_declared_sites() {
                Ok(wired) => info!("预先装配完成: {} 个注入点", wired),
                Err(e) => {
                    // 装配失败时恢复之前的上下文
                    warn!("启动中止，恢复应用上下文: {}", previous.id());
                    set_application_context(previous);
                    return Err(e.into());
                }
            }
        }

        info!("应用上下文启动完成: {}", context.id());
        Ok(context)
    }

    fn initialize_logging(&self) -> Result<(), InfrastructureError> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.log_level));
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

        if self.config.json_logs {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
