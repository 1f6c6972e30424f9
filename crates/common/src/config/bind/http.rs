use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigError;

/// HTTP 服务绑定配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpBindConfig {
    /// 绑定 IP 地址
    ///
    /// 服务实际绑定的网络接口 IP 地址。
    /// 使用 "0.0.0.0" 监听所有接口。
    #[serde(default = "default_ip")]
    pub ip: String,

    /// 绑定端口
    ///
    /// HTTP 服务监听的端口号，0 表示由系统分配。
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpBindConfig {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
        }
    }
}

impl HttpBindConfig {
    /// 解析为监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .ip
            .parse()
            .map_err(|_| ConfigError::invalid_value("bind.http.ip", &self.ip))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
