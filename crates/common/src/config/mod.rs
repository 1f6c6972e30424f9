//! 统一配置管理系统
//!
//! 本模块是 navtrail 服务配置的"单一真理之源"。
//! 所有配置项的定义、文档、默认值都在这里统一管理。

pub mod bind;
pub mod session;

pub use crate::config::bind::{BindConfig, HttpBindConfig};
pub use crate::config::session::SessionConfig;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// navtrail 服务的主配置结构体
///
/// 配置文件使用 TOML 格式，支持完整的类型安全加载。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NavtrailConfig {
    /// 服务器实例名称
    ///
    /// 用于在日志中区分不同的实例，如：navtrail-01, navtrail-prod-east-1 等。
    pub name: String,

    /// 运行环境标识
    ///
    /// - "dev": 开发环境
    /// - "prod": 生产环境
    /// - "test": 测试环境，用于自动化测试
    #[serde(default = "default_env")]
    pub env: String,

    /// 网络绑定配置
    #[serde(default)]
    pub bind: BindConfig,

    /// 会话与面包屑配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 可观测性配置（日志）
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// 可观测性配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ObservabilityConfig {
    /// 过滤级别
    ///
    /// 支持 EnvFilter 语法（如 "info,tower_http=debug"）。默认值 "info"。
    #[serde(default = "default_filter_level")]
    pub filter_level: String,

    #[serde(default)]
    pub log: LogConfig,
}

/// 日志配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    /// 日志输出目标
    ///
    /// - "console": 仅输出到控制台（默认）
    /// - "file": 输出到文件
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志轮转开关
    ///
    /// 当 output = "file" 时有效：
    /// - true: 按天轮转日志文件
    /// - false: 追加到单个文件
    #[serde(default)]
    pub rotate: bool,

    /// 日志文件目录
    ///
    /// 当 output = "file" 时有效
    #[serde(default = "default_log_path")]
    pub path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter_level: default_filter_level(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: default_log_output(),
            rotate: false,
            path: default_log_path(),
        }
    }
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_log_output() -> String {
    "console".to_string()
}

fn default_log_path() -> String {
    "logs/".to_string()
}

fn default_filter_level() -> String {
    "info".to_string()
}

impl Default for NavtrailConfig {
    fn default() -> Self {
        Self {
            name: "navtrail-default".to_string(),
            env: default_env(),
            bind: BindConfig::default(),
            session: SessionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl NavtrailConfig {
    /// 返回可观测性配置引用
    pub fn observability_config(&self) -> &ObservabilityConfig {
        &self.observability
    }

    /// 返回日志配置引用
    pub fn log_config(&self) -> &LogConfig {
        &self.observability.log
    }

    /// 检查是否使用控制台日志输出
    pub fn is_console_logging(&self) -> bool {
        self.observability.log.output == "console"
    }

    /// 检查是否应该轮转日志
    pub fn should_rotate_logs(&self) -> bool {
        self.observability.log.output == "file" && self.observability.log.rotate
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::FileNotFound {
                path: path_ref.display().to_string(),
            });
        }

        if !path_ref.is_file() {
            return Err(ConfigError::NotAFile {
                path: path_ref.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        Ok(Self::from_toml(&content)?)
    }

    /// 从 TOML 字符串加载配置
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 将配置序列化为 TOML 字符串
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// 验证配置有效性
    ///
    /// 收集所有问题后一并返回；以 "Warning:" 开头的条目不视为致命错误。
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Instance name cannot be empty".to_string());
        }

        if !["dev", "prod", "test"].contains(&self.env.as_str()) {
            errors.push(format!(
                "Invalid environment '{}', must be one of: dev, prod, test",
                self.env
            ));
        }

        if let Err(e) = self.bind.http.socket_addr() {
            errors.push(e.to_string());
        }

        if self.env == "prod" && self.session.debug {
            errors.push(
                "Warning: session.debug is enabled in prod, breadcrumb diagnostics will be logged"
                    .to_string(),
            );
        }

        if let Err(e) = self.session.validate() {
            errors.push(e);
        }

        // 验证过滤级别（EnvFilter 语法）
        {
            let main_level = self
                .observability
                .filter_level
                .split(',')
                .next()
                .unwrap_or("")
                .trim();
            if !["trace", "debug", "info", "warn", "error"].contains(&main_level) {
                errors.push(format!(
                    "Invalid filter level '{}', must start with one of: trace, debug, info, warn, error",
                    self.observability.filter_level
                ));
            }
        }

        if !["console", "file"].contains(&self.observability.log.output.as_str()) {
            errors.push(format!(
                "Invalid log output '{}' (observability.log.output), must be 'console' or 'file'",
                self.observability.log.output
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
name = "navtrail-test"
env = "test"

[bind.http]
ip = "127.0.0.1"
port = 18080

[session]
debug = true
idle_timeout_secs = 60

[observability]
filter_level = "debug,tower_http=info"

[observability.log]
output = "console"
"#;

    #[test]
    fn test_parse_sample() {
        let config = NavtrailConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.name, "navtrail-test");
        assert_eq!(config.bind.http.port, 18080);
        assert!(config.session.debug);
        assert_eq!(config.session.idle_timeout_secs, 60);
        assert_eq!(config.session.cleanup_interval, 100);
        assert!(config.is_console_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = NavtrailConfig::from_toml(r#"name = "minimal""#).unwrap();
        assert_eq!(config.env, "dev");
        assert_eq!(config.bind.http.port, 8080);
        assert_eq!(config.observability.filter_level, "info");
        assert!(!config.should_rotate_logs());
    }

    #[test]
    fn test_missing_name_fails_to_parse() {
        assert!(NavtrailConfig::from_toml("env = \"dev\"").is_err());
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = NavtrailConfig {
            name: " ".to_string(),
            env: "staging".to_string(),
            observability: ObservabilityConfig {
                filter_level: "loud".to_string(),
                log: LogConfig {
                    output: "syslog".to_string(),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_debug_in_prod_is_warning_only() {
        let mut config = NavtrailConfig::default();
        config.env = "prod".to_string();
        config.session.debug = true;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Warning:"));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = NavtrailConfig::from_file(&path).unwrap();
        assert_eq!(config.name, "navtrail-test");

        let reparsed = NavtrailConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed.bind.http.port, 18080);
    }

    #[test]
    fn test_from_file_missing_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            NavtrailConfig::from_file(dir.path().join("nope.toml")),
            Err(ConfigError::FileNotFound { .. })
        ));
        assert!(matches!(
            NavtrailConfig::from_file(dir.path()),
            Err(ConfigError::NotAFile { .. })
        ));
    }
}
