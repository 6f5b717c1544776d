//! # Alpha Vantage 接入
//!
//! 上游所有字段均以带数字前缀的字面键传输 (如 `"1. open"`)，日期为 ISO 格式，
//! 价格与成交量以 JSON 字符串而非数字传输。

pub mod ohlcv;
pub mod response;

use async_trait::async_trait;
use std::sync::Arc;
use stockfeed_core::market::entity::{SymbolSearchResult, UpstreamSeries};
use stockfeed_core::market::error::UpstreamError;
use stockfeed_core::market::port::{HttpFetcher, MarketDataProvider};
use tracing::debug;

pub use response::{RATE_LIMIT_MESSAGE, REDACTION_MARKER, redact};

/// 默认的 Alpha Vantage 服务地址
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// # Summary
/// Alpha Vantage 行情提供者实现。
///
/// # Invariants
/// - API Key 只出现在请求 URL 中，日志与错误信息一律脱敏。
/// - 每个逻辑操作只发起一次请求，不做重试。
#[derive(Clone)]
pub struct AlphaVantageProvider {
    // 原始字节抓取器
    fetcher: Arc<dyn HttpFetcher>,
    // 调用凭证
    api_key: String,
    // 服务地址 (不含结尾斜杠)
    base_url: String,
}

impl AlphaVantageProvider {
    /// # Summary
    /// 创建指向默认服务地址的提供者。
    ///
    /// # Arguments
    /// * `fetcher`: HTTP 抓取实现。
    /// * `api_key`: Alpha Vantage 调用凭证。
    pub fn new(fetcher: Arc<dyn HttpFetcher>, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 替换服务地址 (用于代理或测试桩)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 证券搜索接口地址
    pub fn search_url(&self, prefix: &str) -> String {
        format!(
            "{}/query?function=SYMBOL_SEARCH&keywords={}&apikey={}",
            self.base_url,
            urlencoding::encode(prefix),
            self.api_key
        )
    }

    /// 日线接口地址
    pub fn daily_url(&self, symbol: &str) -> String {
        format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol),
            self.api_key
        )
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, UpstreamError> {
        debug!(url = %redact(url, &self.api_key), "requesting Alpha Vantage");
        let body = self.fetcher.get(url).await?;
        debug!(bytes = body.len(), "Alpha Vantage response received");
        Ok(body)
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    /// # Summary
    /// 调用 SYMBOL_SEARCH 接口。
    async fn search_symbols(
        &self,
        prefix: &str,
    ) -> Result<Vec<SymbolSearchResult>, UpstreamError> {
        let body = self.fetch(&self.search_url(prefix)).await?;
        response::parse_symbol_search(&body, &self.api_key)
    }

    /// # Summary
    /// 调用 TIME_SERIES_DAILY 接口 (compact 输出)。
    async fn daily_series(&self, symbol: &str) -> Result<UpstreamSeries, UpstreamError> {
        let body = self.fetch(&self.daily_url(symbol)).await?;
        response::parse_daily_series(&body, &self.api_key)
    }
}
