use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use stockfeed_core::market::entity::SymbolSeries;
use stockfeed_core::store::error::StoreError;
use stockfeed_core::store::port::SymbolStore;

/// 内存版持久化网关，可配置写入失败
#[derive(Default)]
pub struct MemoryStore {
    pub data: Mutex<BTreeMap<String, SymbolSeries>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn get(&self, symbol: &str) -> Option<SymbolSeries> {
        self.data.lock().unwrap().get(symbol).cloned()
    }
}

#[async_trait]
impl SymbolStore for MemoryStore {
    async fn symbol_exists(&self, symbol: &str) -> Result<bool, StoreError> {
        Ok(self.data.lock().unwrap().contains_key(symbol))
    }

    async fn insert_symbol_data(&self, series: &SymbolSeries) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Database("disk full".into()));
        }
        self.data
            .lock()
            .unwrap()
            .insert(series.meta_data.symbol.clone(), series.clone());
        Ok(())
    }

    async fn delete_symbol(&self, symbol: &str) -> Result<(), StoreError> {
        self.data.lock().unwrap().remove(symbol);
        Ok(())
    }

    async fn stored_data(&self) -> Result<Vec<SymbolSeries>, StoreError> {
        Ok(self.data.lock().unwrap().values().cloned().collect())
    }
}
