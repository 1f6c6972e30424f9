//! 配置相关错误类型
//!
//! 定义所有与配置解析、验证、加载相关的错误

use thiserror::Error;

/// 配置相关错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Path is not a regular file: {path}")]
    NotAFile { path: String },

    #[error("Failed to read configuration: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_errors_convert() {
        let err: ConfigError = toml::from_str::<toml::Table>("name = [").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));

        // 顶层必须是表
        let err: ConfigError = toml::to_string(&42u32).unwrap_err().into();
        assert!(matches!(err, ConfigError::Serialize(_)));
        assert!(err.to_string().starts_with("Failed to serialize configuration"));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("bind.http.ip", "nope");
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'bind.http.ip': nope"
        );
    }
}
