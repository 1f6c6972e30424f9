//! 服务信息管理模块

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

/// 服务运行状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    /// 运行中，附带服务对外地址
    Running(String),
}

/// 服务基本信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// 服务名称
    pub name: String,
    /// 服务状态
    pub status: ServiceStatus,
    /// 服务描述
    pub description: Option<String>,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            status: ServiceStatus::Unknown,
            description,
        }
    }

    /// 设置服务状态为运行中
    pub fn set_running(&mut self, url: Url) {
        self.status = ServiceStatus::Running(url.to_string());
        info!("Service '{}' is now running at {}", self.name, self.url());
    }

    /// 检查服务是否正在运行
    pub fn is_running(&self) -> bool {
        matches!(self.status, ServiceStatus::Running(_))
    }

    /// 获取服务状态的 URL（如果是运行状态）
    pub fn url(&self) -> String {
        match &self.status {
            ServiceStatus::Running(url) => url.clone(),
            _ => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut info = ServiceInfo::new("Breadcrumb Service", None);
        assert!(!info.is_running());
        assert_eq!(info.url(), "N/A");

        info.set_running(Url::parse("http://127.0.0.1:8080/sessions").unwrap());
        assert!(info.is_running());
        assert_eq!(info.url(), "http://127.0.0.1:8080/sessions");
    }
}
