use crate::week::bucket_weeks;
use stockfeed_core::common::TradeDate;
use stockfeed_core::market::entity::{
    StockDataPresentation, SymbolMetadata, SymbolSeries, WeekBucket,
};

/// 组合元数据与周分桶
pub fn assemble(meta_data: SymbolMetadata, weeks: Vec<WeekBucket>) -> StockDataPresentation {
    StockDataPresentation { meta_data, weeks }
}

/// # Summary
/// 把单个证券的日线序列转换为对外视图。
///
/// # Arguments
/// * `series`: 已按日期升序排列的证券序列。
/// * `boundary`: 分桶使用的窗口起始日期。
pub fn present_series(series: SymbolSeries, boundary: TradeDate) -> StockDataPresentation {
    let weeks = bucket_weeks(boundary, &series.time_series);
    assemble(series.meta_data, weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockfeed_core::market::entity::{DailyPriceRecord, Ohlc};

    fn date(s: &str) -> TradeDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_series_keeps_metadata() {
        let series = SymbolSeries::new("IBM", date("2025-06-13"), Vec::new());
        let view = present_series(series, date("2025-06-08"));
        assert_eq!(view.meta_data.symbol, "IBM");
        assert_eq!(view.meta_data.size, 0);
        assert!(view.weeks.is_empty());
    }

    #[test]
    fn test_series_is_bucketed_with_metadata() {
        let record = DailyPriceRecord {
            date: date("2025-06-13"),
            ohlc: Ohlc {
                open: dec!(221.98),
                high: dec!(224.40),
                low: dec!(220.35),
                close: dec!(223.26),
            },
            volume: 4_759_490,
        };
        let series = SymbolSeries::new("IBM", date("2025-06-13"), vec![record.clone()]);
        let view = present_series(series, date("2025-06-08"));

        assert_eq!(view.meta_data.size, 1);
        assert_eq!(view.weeks.len(), 1);
        assert_eq!(view.weeks[0].monday, date("2025-06-09"));
        assert_eq!(view.weeks[0].daily_data, vec![record]);
    }
}
