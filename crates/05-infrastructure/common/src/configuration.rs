//! 容器配置
//!
//! 配置来源依次为可选的 `config/ioc.*` 文件与 `IOC_` 前缀的环境变量。

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 默认配置文件名（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/ioc";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "IOC";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 仅允许已声明的组件参与注册与注入
    pub require_declared_components: bool,
    /// 启动时预先解析所有已声明的注入点
    pub eager_injection: bool,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub json_logs: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            require_declared_components: false,
            eager_injection: true,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ContainerConfig {
    /// 从默认文件与环境变量加载
    pub fn load() -> ConfigResult<Self> {
        debug!("加载容器配置: {}", DEFAULT_CONFIG_FILE);
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// 从指定文件与环境变量加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载容器配置: {}", path.display());
        Self::build(config::File::from(path))
    }

    fn build<S>(file: S) -> ConfigResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                error!("配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("未知的日志级别: {}", self.log_level),
            });
        }

        Ok(())
    }
}
