use crate::common::TradeDate;
use rust_decimal::Decimal;

/// # Summary
/// 证券代码搜索的单条候选结果。
///
/// # Invariants
/// - 列表顺序保持上游返回的顺序，不去重、不排序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSearchResult {
    // 证券代码 (例如: BA, BA.LON)
    pub symbol: String,
    // 公司或证券名称
    pub name: String,
    // 所属地区
    pub region: String,
}

/// # Summary
/// 单日的开高低收价格，全部为精确十进制数。
///
/// # Invariants
/// - 四个价格必须同时存在，由类型本身保证。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ohlc {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// # Summary
/// 某证券一个交易日的 OHLCV 记录。
///
/// # Invariants
/// - `volume` 为非负整数，解析时不容忍小数部分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPriceRecord {
    // 交易日期
    pub date: TradeDate,
    // 开高低收
    pub ohlc: Ohlc,
    // 成交量
    pub volume: u64,
}

/// # Summary
/// 上游日线接口解析后的原始结果，尚未做窗口过滤与排序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSeries {
    // 上游回显的证券代码
    pub symbol: String,
    // 上游数据最后刷新日期
    pub last_refreshed: TradeDate,
    // 解析出的日线记录 (顺序不作保证)
    pub records: Vec<DailyPriceRecord>,
}

/// # Summary
/// 证券元数据。
///
/// # Invariants
/// - `size` 等于保留下来的日线记录数量，只在构造时计算一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMetadata {
    pub symbol: String,
    pub last_refreshed: TradeDate,
    pub size: usize,
}

/// # Summary
/// 单个证券的元数据与按日期升序排列的日线序列。
///
/// # Invariants
/// - `meta_data.size == time_series.len()`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSeries {
    pub meta_data: SymbolMetadata,
    pub time_series: Vec<DailyPriceRecord>,
}

impl SymbolSeries {
    /// # Summary
    /// 构造证券序列并计算记录数量。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `last_refreshed`: 最后刷新日期。
    /// * `time_series`: 已按日期升序排列的日线记录。
    pub fn new(
        symbol: impl Into<String>,
        last_refreshed: TradeDate,
        time_series: Vec<DailyPriceRecord>,
    ) -> Self {
        Self {
            meta_data: SymbolMetadata {
                symbol: symbol.into(),
                last_refreshed,
                size: time_series.len(),
            },
            time_series,
        }
    }
}

/// # Summary
/// 一个自然周 (周一至周五) 的日线分桶。
///
/// # Invariants
/// - `friday` 恒等于 `monday` 后第 4 天，与当天是否交易无关。
/// - `daily_data` 中的日期全部落在 `[monday, friday]` 区间内且升序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub monday: TradeDate,
    pub friday: TradeDate,
    pub daily_data: Vec<DailyPriceRecord>,
}

impl WeekBucket {
    /// 以指定周一开启一个空的周分桶
    pub fn starting(monday: TradeDate) -> Self {
        Self {
            monday,
            friday: monday.add_days(4),
            daily_data: Vec::new(),
        }
    }
}

/// # Summary
/// 对外输出的证券数据视图：元数据 + 按周分桶的日线。
///
/// # Invariants
/// - `weeks` 按时间升序排列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDataPresentation {
    pub meta_data: SymbolMetadata,
    pub weeks: Vec<WeekBucket>,
}
