//! 会话存储配置

use serde::{Deserialize, Serialize};

fn default_idle_timeout_secs() -> u64 {
    1800
}

fn default_cleanup_interval() -> u32 {
    100
}

/// 会话与面包屑行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 新建会话的面包屑是否输出调试诊断
    ///
    /// 仅影响诊断日志，不改变任何行为。默认 false。
    #[serde(default)]
    pub debug: bool,

    /// 会话空闲超时（秒）
    ///
    /// 超过该时长未被访问的会话会在惰性清理时被移除。0 表示永不过期。
    /// 默认 1800。
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// 惰性清理触发间隔
    ///
    /// 每处理 N 个请求检查一次过期会话。默认 100。
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debug: false,
            idle_timeout_secs: default_idle_timeout_secs(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl SessionConfig {
    /// Idle timeout, `None` when sessions never expire
    pub fn idle_timeout(&self) -> Option<std::time::Duration> {
        (self.idle_timeout_secs > 0).then(|| std::time::Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cleanup_interval == 0 {
            return Err("session.cleanup_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert!(!config.debug);
        assert_eq!(config.idle_timeout_secs, 1800);
        assert_eq!(config.cleanup_interval, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables_expiry() {
        let config = SessionConfig {
            idle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.idle_timeout().is_none());
    }

    #[test]
    fn test_zero_cleanup_interval_rejected() {
        let config = SessionConfig {
            cleanup_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
