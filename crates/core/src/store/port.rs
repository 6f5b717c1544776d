use super::error::StoreError;
use crate::market::entity::SymbolSeries;
use async_trait::async_trait;

/// # Summary
/// 证券日线数据存储接口 (持久化网关)。
///
/// # Invariants
/// - 单次写入必须是原子的：元数据与全部日线要么全部落库，要么全部回滚。
/// - 读取结果按证券分组，组内日线按日期升序。
#[async_trait]
pub trait SymbolStore: Send + Sync {
    /// # Summary
    /// 检查证券是否已被追踪。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    ///
    /// # Returns
    /// 已存在返回 true。
    async fn symbol_exists(&self, symbol: &str) -> Result<bool, StoreError>;

    /// # Summary
    /// 写入新证券的元数据及日线序列。
    ///
    /// # Logic
    /// 1. 开启事务。
    /// 2. 插入 `symbols` 记录并取得主键。
    /// 3. 批量插入日线记录。
    /// 4. 提交事务。
    ///
    /// # Arguments
    /// * `series`: 已过滤、已排序的证券序列。
    async fn insert_symbol_data(&self, series: &SymbolSeries) -> Result<(), StoreError>;

    /// # Summary
    /// 删除证券及其全部日线。证券不存在时视为成功。
    async fn delete_symbol(&self, symbol: &str) -> Result<(), StoreError>;

    /// # Summary
    /// 读取全部已存储的证券数据。
    ///
    /// # Returns
    /// 按证券代码排序的序列列表，`size` 已按实际条数回填。
    async fn stored_data(&self) -> Result<Vec<SymbolSeries>, StoreError>;
}
