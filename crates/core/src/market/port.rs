use crate::market::entity::{SymbolSearchResult, UpstreamSeries};
use crate::market::error::UpstreamError;
use async_trait::async_trait;

/// # Summary
/// 原始 HTTP 抓取接口，只负责把 URL 变成响应体字节。
///
/// # Invariants
/// - 连接失败或非 2xx 状态映射为 `UpstreamError::Transport`。
/// - 读取响应体失败映射为 `UpstreamError::BodyRead`。
/// - 不做任何重试。
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// # Summary
    /// 执行一次 GET 请求。
    ///
    /// # Arguments
    /// * `url`: 完整请求地址 (可能含 API Key，实现者不得将其写入日志)。
    ///
    /// # Returns
    /// 成功返回响应体原始字节。
    async fn get(&self, url: &str) -> Result<Vec<u8>, UpstreamError>;
}

/// # Summary
/// 行情数据提供者接口 (证券搜索与日线历史)。
///
/// # Invariants
/// - 每个逻辑操作只对上游发起一次调用。
/// - 返回的数据已完成响应分类与字段解析。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 按关键字前缀搜索证券代码。
    ///
    /// # Arguments
    /// * `prefix`: 搜索关键字。
    ///
    /// # Returns
    /// 按上游顺序排列的候选列表。
    async fn search_symbols(&self, prefix: &str)
    -> Result<Vec<SymbolSearchResult>, UpstreamError>;

    /// # Summary
    /// 获取证券的日线历史。
    ///
    /// # Logic
    /// 1. 请求上游日线接口。
    /// 2. 分类响应 (提示信息 / 数据)。
    /// 3. 解析元数据与每日 OHLCV。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    ///
    /// # Returns
    /// 成功返回未经过滤的原始序列。
    async fn daily_series(&self, symbol: &str) -> Result<UpstreamSeries, UpstreamError>;
}
