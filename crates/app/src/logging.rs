use stockfeed_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// 日志文件名前缀，按天滚动
const LOG_FILE_PREFIX: &str = "stockfeed.log";

/// # Summary
/// 初始化全局日志：标准输出 + 按天滚动的文件。
///
/// # Logic
/// 1. `RUST_LOG` 优先，否则使用配置中的级别。
/// 2. 文件输出经 `non_blocking` 写入，关闭 ANSI 颜色。
///
/// # Returns
/// 文件写入线程的守卫，需持有至进程退出以刷新缓冲。
pub fn init_tracing(config: &LogConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file_appender = tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}
