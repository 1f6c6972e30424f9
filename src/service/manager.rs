//! 服务管理器模块 - 负责管理 HTTP 路由服务的生命周期

use super::{HttpRouterService, build_app};
use anyhow::Result;
use navtrail_common::config::NavtrailConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use url::Url;

/// 服务管理器，负责管理多个服务的生命周期
#[derive(Debug)]
pub struct ServiceManager {
    services: Vec<Box<dyn HttpRouterService>>,
    shutdown_tx: broadcast::Sender<()>,
    config: NavtrailConfig,
    local_addr: Option<SocketAddr>,
}

impl ServiceManager {
    /// 创建新的服务管理器
    pub fn new(config: NavtrailConfig, shutdown_tx: broadcast::Sender<()>) -> Self {
        Self {
            services: Vec::new(),
            shutdown_tx,
            config,
            local_addr: None,
        }
    }

    /// 添加服务到管理器
    pub fn add_service(&mut self, service: Box<dyn HttpRouterService>) {
        info!("Adding service '{}' to manager", service.info().name);
        self.services.push(service);
    }

    /// 实际监听的地址（端口配置为 0 时由系统分配）
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// 启动HTTP服务器，合并所有HTTP路由服务
    pub async fn start_all(&mut self) -> Result<JoinHandle<()>> {
        if self.services.is_empty() {
            return Err(anyhow::anyhow!("No services registered"));
        }

        info!(
            "Starting HTTP server with {} route services (environment: {})",
            self.services.len(),
            self.config.env
        );

        let addr = self.config.bind.http.socket_addr()?;
        let app = build_app(&mut self.services)
            .await?
            .layer(CorsLayer::permissive());

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
        let local_addr = listener.local_addr()?;
        self.local_addr = Some(local_addr);
        info!("HTTP server listening on {}", local_addr);

        let base_url = Url::parse(&format!("http://{local_addr}"))
            .map_err(|e| anyhow::anyhow!("Failed to parse HTTP URL: {e}"))?;
        for service in &mut self.services {
            let service_url = base_url.join(service.route_prefix())?;
            if let Err(e) = service.on_start(service_url).await {
                error!("Failed to start service '{}': {:?}", service.info().name, e);
            }
        }

        let shutdown_tx = self.shutdown_tx.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            let server = axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server received shutdown signal");
            });
            if let Err(e) = server.await {
                error!("HTTP server error: {}", e);
                let _ = shutdown_tx.send(());
            }
            info!("HTTP server stopped");
        });

        Ok(handle)
    }

    /// Stop all services
    pub async fn stop_all(&mut self) -> Result<()> {
        info!("Stopping all services");

        let _ = self.shutdown_tx.send(());
        for service in &mut self.services {
            if let Err(e) = service.on_stop().await {
                error!("Failed to stop service '{}': {:?}", service.info().name, e);
            }
        }

        info!("All services stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::TrailHttpService;

    fn test_config() -> NavtrailConfig {
        let mut config = NavtrailConfig::default();
        config.env = "test".to_string();
        config.bind.http.port = 0;
        config
    }

    #[tokio::test]
    async fn test_start_without_services_fails() {
        let (tx, _) = broadcast::channel(1);
        let mut manager = ServiceManager::new(test_config(), tx);
        assert!(manager.start_all().await.is_err());
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let (tx, _) = broadcast::channel(1);
        let config = test_config();
        let mut manager = ServiceManager::new(config.clone(), tx);
        manager.add_service(Box::new(TrailHttpService::new(config)));

        let handle = manager.start_all().await.unwrap();
        let addr = manager.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
        assert!(manager.services[0].info().is_running());
        assert_eq!(
            manager.services[0].info().url(),
            format!("http://{addr}/sessions")
        );

        let body: serde_json::Value = reqwest::get(format!("http://{addr}/sessions/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "healthy");

        manager.stop_all().await.unwrap();
        handle.await.unwrap();
        assert!(!manager.services[0].info().is_running());
    }
}
