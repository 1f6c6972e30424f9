//! navtrail 服务主程序
//!
//! 启动面包屑 HTTP 服务，按会话维护导航轨迹并渲染 HTML 片段

mod cli;
mod error;
mod observability;

use clap::Parser;
use navtrail::NavtrailConfig;
use navtrail::service::{ServiceManager, TrailHttpService};
use observability::init_observability;
use std::path::{Path, PathBuf};
use tracing::{error, info};

macro_rules! bootstrap_info {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

macro_rules! bootstrap_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

use cli::{Cli, Commands};
use error::{Error, Result};

/// Application launcher utilities
struct ApplicationLauncher;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Test { config_file }) => {
            let config_path =
                ApplicationLauncher::find_config_file(config_file.as_ref().unwrap_or(&cli.config))?;
            ApplicationLauncher::test_config_file(&config_path)
        }
        None => {
            let config_path = ApplicationLauncher::find_config_file(&cli.config)?;

            // Create Tokio runtime（before running the application）
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            runtime.block_on(ApplicationLauncher::run_application(&config_path))
        }
    }
}

impl ApplicationLauncher {
    /// Find config file with fallback locations
    fn find_config_file(provided_path: &PathBuf) -> Result<PathBuf> {
        // If the provided path is not the default "config.toml", check if it exists
        if provided_path != Path::new("config.toml") {
            if provided_path.exists() {
                bootstrap_info!("Using provided config file: {:?}", provided_path);
                return Ok(provided_path.clone());
            } else {
                bootstrap_error!("Provided config file not found: {:?}", provided_path);
                return Err(Error::custom(format!(
                    "Config file not found: {provided_path:?}"
                )));
            }
        }

        let fallback_paths = vec![
            // 1. Current working directory
            PathBuf::from("config.toml"),
            // 2. System config directory
            PathBuf::from("/etc/navtrail/config.toml"),
        ];

        bootstrap_info!("Searching for config file in default locations...");

        for path in &fallback_paths {
            if path.exists() {
                bootstrap_info!("Found config file: {:?}", path);
                return Ok(path.clone());
            } else {
                bootstrap_info!("Config not found at: {:?}", path);
            }
        }

        bootstrap_error!("No configuration file found!");
        bootstrap_error!("Please create a config file in one of these locations:");
        for (i, path) in fallback_paths.iter().enumerate() {
            bootstrap_error!("  {}. {:?}", i + 1, path);
        }
        bootstrap_error!("Or specify a custom path with: navtrail --config <path>");

        Err(Error::custom(
            "No configuration file found. Please create one or specify path with --config",
        ))
    }

    /// 打印验证结果，存在非警告条目时返回 true
    fn report_validation(errors: &[String]) -> bool {
        let mut has_errors = false;
        for (i, err) in errors.iter().enumerate() {
            if err.starts_with("Warning:") {
                bootstrap_info!("  {}. ⚠️  {}", i + 1, err);
            } else {
                bootstrap_error!("  {}. ❌ {}", i + 1, err);
                has_errors = true;
            }
        }
        has_errors
    }

    /// 测试配置文件是否有效
    fn test_config_file(config_path: &Path) -> Result<()> {
        match NavtrailConfig::from_file(config_path) {
            Ok(config) => {
                bootstrap_info!("✅ 配置文件解析成功: {:?}", config_path);

                if let Err(errors) = config.validate() {
                    bootstrap_error!("❌ 配置验证发现问题:");
                    if Self::report_validation(&errors) {
                        return Err(Error::service_validation("配置验证失败"));
                    }
                }

                bootstrap_info!("✅ 完整配置验证通过");
                Ok(())
            }
            Err(e) => {
                bootstrap_error!("❌ 配置文件解析失败: {}", e);
                Err(Error::service_validation(format!("配置解析失败: {e}")))
            }
        }
    }

    /// 运行应用程序的主入口
    async fn run_application(config_path: &Path) -> Result<()> {
        bootstrap_info!("📄 加载配置文件: {:?}", config_path);

        let config = match NavtrailConfig::from_file(config_path) {
            Ok(config) => {
                bootstrap_info!("✅ 配置加载成功");

                if let Err(errors) = config.validate() {
                    bootstrap_error!("❌ 配置验证发现问题:");
                    if Self::report_validation(&errors) {
                        return Err(Error::custom("配置验证失败，请修复上述错误"));
                    }
                }

                config
            }
            Err(e) => {
                bootstrap_error!("❌ 配置加载失败: {}", e);
                return Err(e.into());
            }
        };

        // 初始化日志系统
        let observability_guard = init_observability(&config)?;
        if observability_guard.is_file_backed() {
            bootstrap_info!("日志已重定向到: {}", config.log_config().path);
        }

        Self::run_services(config).await
    }

    /// 启动服务并等待关闭
    async fn run_services(config: NavtrailConfig) -> Result<()> {
        info!("🚀 启动 navtrail 实例 '{}' (env: {})", config.name, config.env);

        let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(10);
        setup_ctrl_c_handler(shutdown_tx.clone()).await;

        let mut service_manager = ServiceManager::new(config.clone(), shutdown_tx.clone());
        info!("📊 计划启动的服务:");
        info!("  - Breadcrumb Service (/sessions)");
        service_manager.add_service(Box::new(TrailHttpService::new(config.clone())));

        let handle = service_manager
            .start_all()
            .await
            .map_err(|e| Error::service_startup(format!("HTTP 服务启动失败: {e}")))?;

        if let Some(addr) = service_manager.local_addr() {
            Self::display_service_info(&config, &addr.to_string());
        }

        if let Err(e) = handle.await {
            error!("Service task terminated unexpectedly: {}", e);
            let _ = shutdown_tx.send(());
        }
        service_manager.stop_all().await?;

        info!("🛑 所有服务已安全关闭");
        Ok(())
    }

    /// 显示服务信息
    fn display_service_info(config: &NavtrailConfig, addr: &str) {
        let base = format!("http://{addr}/sessions");
        info!("✅ 所有服务已启动");
        info!("📡 HTTP 服务器监听在: http://{}", addr);
        info!("🔧 可用的API端点:");
        info!("  - POST {}", base);
        info!("  - {}/{{session_id}}/trail", base);
        info!("  - {}/health", base);
        if config.session.debug {
            info!("🐞 面包屑调试日志已开启 (target: breadcrumb::trail)");
        }
    }
}

/// 设置Ctrl-C信号处理程序
async fn setup_ctrl_c_handler(shutdown_tx: tokio::sync::broadcast::Sender<()>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听Ctrl-C信号: {}", e);
            return;
        }
        info!("收到Ctrl-C信号，开始优雅关闭...");
        let _ = shutdown_tx.send(());
    });
}
