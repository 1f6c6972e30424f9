//! 面包屑 HTTP 服务实现
//!
//! 以 `/sessions` 为前缀提供会话面包屑的 HTTP API

use crate::service::{HttpRouterService, info::ServiceInfo};
use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use breadcrumb::{create_router, create_trail_state};
use navtrail_common::config::NavtrailConfig;
use tracing::info;

/// 面包屑 HTTP 服务实现
#[derive(Debug)]
pub struct TrailHttpService {
    info: ServiceInfo,
    config: NavtrailConfig,
}

impl TrailHttpService {
    pub fn new(config: NavtrailConfig) -> Self {
        Self {
            info: ServiceInfo::new(
                "Breadcrumb Service",
                Some("按会话维护导航面包屑并渲染 HTML 片段".to_string()),
            ),
            config,
        }
    }
}

#[async_trait]
impl HttpRouterService for TrailHttpService {
    fn info(&self) -> &ServiceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ServiceInfo {
        &mut self.info
    }

    async fn build_router(&mut self) -> Result<Router> {
        info!("Building breadcrumb router");

        self.config
            .session
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid session configuration: {e}"))?;
        let state = create_trail_state(&self.config.session);
        let router = create_router(state);

        info!("Breadcrumb router built successfully");
        Ok(router)
    }

    fn route_prefix(&self) -> &str {
        "/sessions"
    }
}
