//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 价格一律以字符串输出，保持上游的十进制精度。

use serde::{Deserialize, Serialize};
use stockfeed_core::market::entity::{
    DailyPriceRecord, StockDataPresentation, SymbolMetadata, SymbolSearchResult, WeekBucket,
};
use utoipa::ToSchema;

// ============================================================
//  搜索相关 DTO
// ============================================================

/// 证券搜索候选 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymbolMatchResponse {
    /// 证券代码
    #[schema(example = "BA")]
    pub symbol: String,
    /// 证券名称
    #[schema(example = "Boeing Company")]
    pub name: String,
    /// 地区
    #[schema(example = "United States")]
    pub region: String,
}

impl From<SymbolSearchResult> for SymbolMatchResponse {
    fn from(m: SymbolSearchResult) -> Self {
        Self {
            symbol: m.symbol,
            name: m.name,
            region: m.region,
        }
    }
}

/// 证券搜索结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymbolSearchResponse {
    /// 按上游顺序排列的候选
    pub best_matches: Vec<SymbolMatchResponse>,
}

// ============================================================
//  日线相关 DTO
// ============================================================

/// 开高低收 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OhlcResponse {
    #[schema(example = "221.9800")]
    pub open: String,
    #[schema(example = "224.4000")]
    pub high: String,
    #[schema(example = "220.3500")]
    pub low: String,
    #[schema(example = "223.2600")]
    pub close: String,
}

/// 单日数据 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyDataResponse {
    /// 交易日期 (YYYY-MM-DD)
    #[schema(example = "2025-06-13")]
    pub day: String,
    pub ohlc: OhlcResponse,
    /// 成交量
    #[schema(example = 4759490)]
    pub volume: u64,
}

impl From<DailyPriceRecord> for DailyDataResponse {
    fn from(r: DailyPriceRecord) -> Self {
        Self {
            day: r.date.to_string(),
            ohlc: OhlcResponse {
                open: r.ohlc.open.to_string(),
                high: r.ohlc.high.to_string(),
                low: r.ohlc.low.to_string(),
                close: r.ohlc.close.to_string(),
            },
            volume: r.volume,
        }
    }
}

/// 周分桶 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeekResponse {
    #[schema(example = "2025-06-09")]
    pub monday: String,
    #[schema(example = "2025-06-13")]
    pub friday: String,
    pub daily_data: Vec<DailyDataResponse>,
}

impl From<WeekBucket> for WeekResponse {
    fn from(w: WeekBucket) -> Self {
        Self {
            monday: w.monday.to_string(),
            friday: w.friday.to_string(),
            daily_data: w.daily_data.into_iter().map(Into::into).collect(),
        }
    }
}

/// 证券元数据 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetaDataResponse {
    #[schema(example = "IBM")]
    pub symbol: String,
    #[schema(example = "2025-06-13")]
    pub last_refreshed: String,
    /// 保留的日线条数
    #[schema(example = 68)]
    pub size: usize,
}

impl From<SymbolMetadata> for MetaDataResponse {
    fn from(m: SymbolMetadata) -> Self {
        Self {
            symbol: m.symbol,
            last_refreshed: m.last_refreshed.to_string(),
            size: m.size,
        }
    }
}

/// 单个证券的按周视图 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockDataResponse {
    pub meta_data: MetaDataResponse,
    pub weeks_covered: Vec<WeekResponse>,
}

impl From<StockDataPresentation> for StockDataResponse {
    fn from(p: StockDataPresentation) -> Self {
        Self {
            meta_data: p.meta_data.into(),
            weeks_covered: p.weeks.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockfeed_core::common::TradeDate;
    use stockfeed_core::market::entity::{Ohlc, SymbolSeries};

    #[test]
    fn test_presentation_json_shape() {
        let day: TradeDate = "2025-06-13".parse().unwrap();
        let price = "223.2600".parse().unwrap();
        let record = DailyPriceRecord {
            date: day,
            ohlc: Ohlc {
                open: price,
                high: price,
                low: price,
                close: price,
            },
            volume: 7,
        };
        let series = SymbolSeries::new("IBM", day, vec![record.clone()]);
        let view = StockDataPresentation {
            meta_data: series.meta_data,
            weeks: vec![WeekBucket {
                monday: day.add_days(-4),
                friday: day,
                daily_data: vec![record],
            }],
        };

        let json = serde_json::to_value(StockDataResponse::from(view)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "meta_data": {"symbol": "IBM", "last_refreshed": "2025-06-13", "size": 1},
                "weeks_covered": [{
                    "monday": "2025-06-09",
                    "friday": "2025-06-13",
                    "daily_data": [{
                        "day": "2025-06-13",
                        "ohlc": {"open": "223.2600", "high": "223.2600", "low": "223.2600", "close": "223.2600"},
                        "volume": 7
                    }]
                }]
            })
        );
    }
}
