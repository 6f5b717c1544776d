use std::sync::Arc;
use stockfeed_core::market::entity::{StockDataPresentation, SymbolSearchResult, SymbolSeries};
use stockfeed_core::market::error::UpstreamError;
use stockfeed_core::market::port::MarketDataProvider;
use stockfeed_core::store::error::StoreError;
use stockfeed_core::store::port::SymbolStore;
use stockfeed_market::{present_series, trailing_window_start};
use thiserror::Error;
use tracing::{debug, info};

/// # Summary
/// Manager 层的统一错误类型。
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("The stock (symbol) is already tracked in the database and monitored regularly")]
    AlreadyTracked(String),
    #[error("Store error: {0}")]
    Persistence(#[from] StoreError),
}

/// # Summary
/// 证券数据用例门面 (Facade)。
/// 编译期仅依赖 `stockfeed-core` 中的 Trait 定义，具体实现通过构造函数注入。
///
/// # Invariants
/// - 每个用例单次执行到底，任何阶段失败立即返回，不做重试。
/// - 不持有跨请求的可变状态。
pub struct StockFeedManager {
    // 上游行情接口
    provider: Arc<dyn MarketDataProvider>,
    // 持久化网关
    store: Arc<dyn SymbolStore>,
    // 尾部窗口保留天数
    window_days: u32,
}

impl StockFeedManager {
    /// # Summary
    /// 创建 StockFeedManager 实例。
    ///
    /// # Arguments
    /// * `provider` - 行情提供者的具体实现。
    /// * `store` - 持久化网关的具体实现。
    /// * `window_days` - 收录时保留的尾部日历天数。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的管理器实例。
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn SymbolStore>,
        window_days: u32,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            store,
            window_days,
        })
    }

    /// # Summary
    /// 按关键字前缀搜索证券代码，结果保持上游顺序。
    pub async fn search_symbols(
        &self,
        keywords: &str,
    ) -> Result<Vec<SymbolSearchResult>, ManagerError> {
        let matches = self.provider.search_symbols(keywords).await?;
        debug!(keywords, matches = matches.len(), "symbol search finished");
        Ok(matches)
    }

    /// # Summary
    /// 开始追踪一个新证券：抓取、过滤、落库并返回按周分桶的视图。
    ///
    /// # Logic
    /// 1. 检查是否已追踪，已存在直接返回 AlreadyTracked (不访问上游)。
    /// 2. 抓取并解析上游日线。
    /// 3. 计算尾部窗口起点，丢弃更早的记录并按日期升序排序。
    /// 4. 以请求的证券代码落库。
    /// 5. 以窗口起点为边界按周分桶。
    ///
    /// # Arguments
    /// * `symbol` - 证券代码。
    ///
    /// # Returns
    /// * `Result<StockDataPresentation, ManagerError>` - 收录后的对外视图。
    pub async fn collect_symbol(&self, symbol: &str) -> Result<StockDataPresentation, ManagerError> {
        if self.store.symbol_exists(symbol).await? {
            info!(symbol, "symbol already tracked");
            return Err(ManagerError::AlreadyTracked(symbol.to_string()));
        }

        let upstream = self.provider.daily_series(symbol).await?;
        info!(
            symbol,
            last_refreshed = %upstream.last_refreshed,
            rows = upstream.records.len(),
            "upstream daily series fetched"
        );

        let start = trailing_window_start(upstream.last_refreshed, self.window_days);
        let mut records: Vec<_> = upstream
            .records
            .into_iter()
            .filter(|r| r.date >= start)
            .collect();
        records.sort_by_key(|r| r.date);

        let series = SymbolSeries::new(symbol, upstream.last_refreshed, records);
        self.store.insert_symbol_data(&series).await?;
        info!(symbol, window_start = %start, size = series.meta_data.size, "symbol collected");

        Ok(present_series(series, start))
    }

    /// # Summary
    /// 停止追踪证券。证券不存在时同样返回成功。
    pub async fn delete_symbol(&self, symbol: &str) -> Result<(), ManagerError> {
        self.store.delete_symbol(symbol).await?;
        info!(symbol, "symbol deleted");
        Ok(())
    }

    /// # Summary
    /// 读取全部已追踪证券并逐个按周分桶。
    ///
    /// # Logic
    /// 每个证券以其 `last_refreshed` 重新计算窗口起点作为分桶边界。
    pub async fn stored_data(&self) -> Result<Vec<StockDataPresentation>, ManagerError> {
        let stored = self.store.stored_data().await?;
        debug!(symbols = stored.len(), "stored data loaded");

        Ok(stored
            .into_iter()
            .map(|series| {
                let start = trailing_window_start(series.meta_data.last_refreshed, self.window_days);
                present_series(series, start)
            })
            .collect())
    }
}
