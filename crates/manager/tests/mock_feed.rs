use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockfeed_core::market::entity::{SymbolSearchResult, UpstreamSeries};
use stockfeed_core::market::error::UpstreamError;
use stockfeed_core::market::port::MarketDataProvider;

/// 返回预设结果并统计调用次数的行情提供者
pub struct CannedProvider {
    pub search: Result<Vec<SymbolSearchResult>, UpstreamError>,
    pub daily: Result<UpstreamSeries, UpstreamError>,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn daily(daily: Result<UpstreamSeries, UpstreamError>) -> Self {
        Self {
            search: Ok(vec![]),
            daily,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn search(search: Result<Vec<SymbolSearchResult>, UpstreamError>) -> Self {
        Self {
            search,
            daily: Err(UpstreamError::Informational("not configured".into())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for CannedProvider {
    async fn search_symbols(&self, _prefix: &str) -> Result<Vec<SymbolSearchResult>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.search.clone()
    }

    async fn daily_series(&self, _symbol: &str) -> Result<UpstreamSeries, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.daily.clone()
    }
}
