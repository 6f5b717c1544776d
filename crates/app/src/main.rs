mod logging;
mod settings;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use stockfeed_api::server::{AppState, start_server};
use stockfeed_feed::alpha_vantage::AlphaVantageProvider;
use stockfeed_feed::http::ReqwestFetcher;
use stockfeed_manager::StockFeedManager;
use stockfeed_store::SqliteSymbolStore;
use tracing::{info, warn};

/// 配置文件目录
const CONFIG_DIR: &str = "config";

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 StockFeedManager。
///
/// # Logic
/// 1. 加载 `.env` 与分层配置，初始化全局日志。
/// 2. 实例化基础设施层（Feed、Store）。
/// 3. 构造应用服务层（StockFeedManager）。
/// 4. 启动 HTTP 服务，收到 Ctrl-C 后优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置并初始化日志
    dotenvy::dotenv().ok();
    let config = settings::load_config(Path::new(CONFIG_DIR))?;
    let _log_guard = logging::init_tracing(&config.log);
    info!("Stockfeed starting...");

    let av = &config.alpha_vantage;
    if av.api_key.is_empty() {
        warn!("alpha_vantage.api_key is empty; upstream calls will be rejected");
    }

    // 2. 实例化基础设施层
    let fetcher = Arc::new(ReqwestFetcher::new(Duration::from_secs(av.timeout_secs))?);
    let provider = Arc::new(
        AlphaVantageProvider::new(fetcher, av.api_key.clone()).with_base_url(av.base_url.clone()),
    );
    let store = Arc::new(SqliteSymbolStore::new(&config.database.data_dir).await?);

    // 3. 构造应用服务层（注入 Core Trait 抽象）
    let manager = StockFeedManager::new(provider, store, av.window_days);
    info!(window_days = av.window_days, "StockFeedManager initialized");

    // 4. 启动服务，挂起直到退出信号
    start_server(AppState { manager }, &config.bind_addr(), shutdown_signal()).await?;
    info!("Exiting...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
