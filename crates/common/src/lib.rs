//! navtrail 基础设施库
//!
//! 为面包屑导航服务提供配置加载与统一错误类型

pub mod config;
pub mod error;

pub use config::NavtrailConfig;
pub use error::ConfigError;
