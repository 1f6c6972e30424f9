//! 统一错误处理模型
//!
//! 提供主程序 navtrail 的顶层错误类型，聚合子模块和依赖 crate 的错误

use thiserror::Error;

/// 主程序的统一错误枚举
#[derive(Debug, Error)]
pub enum Error {
    /// 配置文件相关错误
    #[error("Configuration error: {0}")]
    Config(#[from] navtrail_common::ConfigError),

    /// I/O 操作错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 服务启动失败
    #[error("Service startup failed: {message}")]
    ServiceStartup { message: String },

    /// 服务配置验证失败
    #[error("Service configuration validation failed: {message}")]
    ServiceValidation { message: String },

    /// Anyhow 错误兼容层
    #[error("Legacy error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// 自定义错误消息
    #[error("Application error: {message}")]
    Custom { message: String },
}

impl Error {
    /// 创建服务启动错误
    pub fn service_startup(message: impl Into<String>) -> Self {
        Self::ServiceStartup {
            message: message.into(),
        }
    }

    /// 创建服务验证错误
    pub fn service_validation(message: impl Into<String>) -> Self {
        Self::ServiceValidation {
            message: message.into(),
        }
    }

    /// 创建自定义错误
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

/// 主程序的 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(
            Error::service_startup("bind failed")
                .to_string()
                .contains("bind failed")
        );
        assert!(matches!(
            Error::service_validation("bad"),
            Error::ServiceValidation { .. }
        ));
        assert_eq!(Error::custom("x").to_string(), "Application error: x");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = navtrail_common::ConfigError::FileNotFound {
            path: "a.toml".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Config(_)));
    }
}
