use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::fs;
use std::path::Path;
use stockfeed_core::common::TradeDate;
use stockfeed_core::market::entity::{DailyPriceRecord, Ohlc, SymbolSeries};
use stockfeed_core::store::error::StoreError;
use stockfeed_core::store::port::SymbolStore;
use tracing::{debug, info};

/// 证券数据库文件名
pub const DEFAULT_DB_FILE: &str = "stockfeed.db";

/// `stored_data` 联表查询的单行结果
type JoinedRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
);

/// SymbolStore 的 SQLite 实现。
///
/// # Summary
/// 在单个 SQLite 数据库中保存被追踪证券的元数据与日线。
///
/// # Invariants
/// * 价格以十进制字符串落库，读写不经过浮点数。
/// * 删除证券时日线记录通过外键级联删除。
pub struct SqliteSymbolStore {
    pool: SqlitePool,
}

impl SqliteSymbolStore {
    /// 打开 (必要时创建) 数据目录下的证券数据库并初始化表结构。
    ///
    /// # Logic
    /// 1. 确保数据目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing` 与外键约束。
    /// 3. 执行 DDL 初始化 `symbols` 与 `ohlcv_per_day` 表。
    ///
    /// # Arguments
    /// * `data_dir` - 数据库文件所在目录。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或初始化错误。
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = data_dir.as_ref();
        fs::create_dir_all(root).map_err(|e| StoreError::InitError(e.to_string()))?;

        let db_path = root.join(DEFAULT_DB_FILE);
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS symbols (
                symbol_id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL UNIQUE,
                last_refreshed TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS ohlcv_per_day (
                symbol_id INTEGER NOT NULL REFERENCES symbols(symbol_id) ON DELETE CASCADE,
                record_day TEXT NOT NULL,
                open_price TEXT NOT NULL,
                high_price TEXT NOT NULL,
                low_price TEXT NOT NULL,
                close_price TEXT NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (symbol_id, record_day)
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        info!(path = %db_path.display(), "symbol store ready");
        Ok(Self { pool })
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn parse_date(raw: &str) -> Result<TradeDate, StoreError> {
    raw.parse()
        .map_err(|e| StoreError::Corrupt(format!("date {raw:?}: {e}")))
}

fn parse_price(raw: Option<String>, column: &str) -> Result<Decimal, StoreError> {
    let raw = raw.ok_or_else(|| StoreError::Corrupt(format!("{column} is null")))?;
    Decimal::from_str_exact(&raw).map_err(|e| StoreError::Corrupt(format!("{column} {raw:?}: {e}")))
}

/// 把联表查询的日线列还原为领域记录
fn record_from_columns(
    day: String,
    open: Option<String>,
    high: Option<String>,
    low: Option<String>,
    close: Option<String>,
    volume: Option<i64>,
) -> Result<DailyPriceRecord, StoreError> {
    let date = parse_date(&day)?;
    let ohlc = Ohlc {
        open: parse_price(open, "open_price")?,
        high: parse_price(high, "high_price")?,
        low: parse_price(low, "low_price")?,
        close: parse_price(close, "close_price")?,
    };
    let volume = volume.ok_or_else(|| StoreError::Corrupt("volume is null".into()))?;
    let volume = u64::try_from(volume)
        .map_err(|_| StoreError::Corrupt(format!("negative volume {volume}")))?;
    Ok(DailyPriceRecord { date, ohlc, volume })
}

#[async_trait]
impl SymbolStore for SqliteSymbolStore {
    async fn symbol_exists(&self, symbol: &str) -> Result<bool, StoreError> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT symbol_id FROM symbols WHERE symbol = ?")
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.is_some())
    }

    /// # Summary
    /// 在单个事务中写入元数据与全部日线。
    ///
    /// # Logic
    /// 1. 插入 `symbols` 并取回自增主键。
    /// 2. 逐条插入 `ohlcv_per_day`。
    /// 3. 提交；任一步失败时事务随 drop 回滚。
    async fn insert_symbol_data(&self, series: &SymbolSeries) -> Result<(), StoreError> {
        let meta = &series.meta_data;
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let symbol_id = sqlx::query("INSERT INTO symbols (symbol, last_refreshed) VALUES (?, ?)")
            .bind(&meta.symbol)
            .bind(meta.last_refreshed.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .last_insert_rowid();

        for record in &series.time_series {
            let volume = i64::try_from(record.volume).map_err(|_| {
                StoreError::Database(format!("volume {} exceeds column range", record.volume))
            })?;
            sqlx::query(
                r#"
                INSERT INTO ohlcv_per_day (symbol_id, record_day, open_price, high_price, low_price, close_price, volume)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(symbol_id)
            .bind(record.date.to_string())
            .bind(record.ohlc.open.to_string())
            .bind(record.ohlc.high.to_string())
            .bind(record.ohlc.low.to_string())
            .bind(record.ohlc.close.to_string())
            .bind(volume)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        debug!(symbol = %meta.symbol, rows = series.time_series.len(), "symbol data inserted");
        Ok(())
    }

    async fn delete_symbol(&self, symbol: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM symbols WHERE symbol = ?")
            .bind(symbol)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        debug!(symbol, removed = result.rows_affected(), "symbol delete executed");
        Ok(())
    }

    /// # Summary
    /// 读取全部证券及其日线。
    ///
    /// # Logic
    /// 1. `symbols` 左联 `ohlcv_per_day`，按证券代码与日期排序。
    /// 2. 相邻同代码的行归为一组；没有日线的证券得到空序列。
    /// 3. 每组构造 `SymbolSeries`，`size` 取实际条数。
    async fn stored_data(&self) -> Result<Vec<SymbolSeries>, StoreError> {
        let rows = sqlx::query_as::<_, JoinedRow>(
            r#"
            SELECT s.symbol, s.last_refreshed, o.record_day,
                   o.open_price, o.high_price, o.low_price, o.close_price, o.volume
            FROM symbols s
            LEFT JOIN ohlcv_per_day o ON o.symbol_id = s.symbol_id
            ORDER BY s.symbol, o.record_day
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut groups: Vec<(String, TradeDate, Vec<DailyPriceRecord>)> = Vec::new();
        for (symbol, last_refreshed, day, open, high, low, close, volume) in rows {
            let is_new_group = groups.last().is_none_or(|(s, _, _)| *s != symbol);
            if is_new_group {
                groups.push((symbol, parse_date(&last_refreshed)?, Vec::new()));
            }
            let Some(day) = day else {
                continue;
            };
            let record = record_from_columns(day, open, high, low, close, volume)?;
            if let Some((_, _, records)) = groups.last_mut() {
                records.push(record);
            }
        }

        Ok(groups
            .into_iter()
            .map(|(symbol, last_refreshed, records)| {
                SymbolSeries::new(symbol, last_refreshed, records)
            })
            .collect())
    }
}
