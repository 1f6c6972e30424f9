//! # navtrail
//!
//! 按会话维护导航面包屑并渲染为 HTML 片段的 Web 服务

pub mod service;

// Re-export commonly used types
pub use navtrail_common::config::NavtrailConfig;
pub use service::{HttpRouterService, TrailHttpService, build_app};
