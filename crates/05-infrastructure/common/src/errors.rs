//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 键从未注册过
    #[error("组件未注册: {key}")]
    BeanNotFound { key: String },

    /// 组件不满足注册条件，或装饰参数非法
    #[error("组件配置错误: {type_name}, 原因: {message}")]
    Configuration { type_name: String, message: String },

    #[error("组件类型不匹配: 键 {key} 已被其他类型占用, 期望 {expected}")]
    TypeMismatch { key: String, expected: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 创建未注册错误
    pub fn not_found(key: impl std::fmt::Display) -> Self {
        Self::BeanNotFound {
            key: key.to_string(),
        }
    }

    /// 创建配置错误
    pub fn configuration(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 包装构造函数内部的错误
    pub fn creation_failed<T: ?Sized>(
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: std::any::type_name::<T>().to_string(),
            source: source.into(),
        }
    }

    /// 是否为未注册错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BeanNotFound { .. })
    }

    /// 是否为配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件元数据无效: {message}")]
    InvalidMetadata { message: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("组件错误: {source}")]
    ComponentError {
        #[from]
        source: ComponentError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
