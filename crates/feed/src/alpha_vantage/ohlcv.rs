use rust_decimal::Decimal;
use std::collections::HashMap;
use stockfeed_core::common::TradeDate;
use stockfeed_core::market::entity::{DailyPriceRecord, Ohlc};
use stockfeed_core::market::error::UpstreamError;

/// 上游日线字段的字面键名
pub const OPEN_KEY: &str = "1. open";
pub const HIGH_KEY: &str = "2. high";
pub const LOW_KEY: &str = "3. low";
pub const CLOSE_KEY: &str = "4. close";
pub const VOLUME_KEY: &str = "5. volume";

/// # Summary
/// 将上游单日字段表解析为强类型日线记录。
///
/// # Logic
/// 1. 依次校验 open -> high -> low -> close，缺失报 FieldMissing，非法十进制报 FieldUnparseable。
/// 2. 最后校验 volume，必须是非负整数。
/// 3. 价格键去掉数字前缀后落入 `Ohlc` 固定结构。
///
/// # Arguments
/// * `date`: 该行对应的交易日期 (来自上游的日期键)。
/// * `fields`: 上游字面键到字符串值的映射。
///
/// # Returns
/// 第一个失败的字段决定返回的错误，顺序固定以保证错误信息可复现。
pub fn parse_row(
    date: TradeDate,
    fields: &HashMap<String, String>,
) -> Result<DailyPriceRecord, UpstreamError> {
    let ohlc = Ohlc {
        open: price(fields, OPEN_KEY, "open")?,
        high: price(fields, HIGH_KEY, "high")?,
        low: price(fields, LOW_KEY, "low")?,
        close: price(fields, CLOSE_KEY, "close")?,
    };

    let raw_volume = fields
        .get(VOLUME_KEY)
        .ok_or_else(|| UpstreamError::FieldMissing("volume".into()))?;
    let volume = raw_volume
        .parse::<u64>()
        .map_err(|e| UpstreamError::unparseable("volume", e))?;

    Ok(DailyPriceRecord { date, ohlc, volume })
}

fn price(
    fields: &HashMap<String, String>,
    key: &str,
    name: &str,
) -> Result<Decimal, UpstreamError> {
    let raw = fields
        .get(key)
        .ok_or_else(|| UpstreamError::FieldMissing(name.into()))?;
    Decimal::from_str_exact(raw).map_err(|e| UpstreamError::unparseable(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> TradeDate {
        TradeDate::from_ymd(2025, 6, 13).unwrap()
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const FULL: [(&str, &str); 5] = [
        (OPEN_KEY, "100"),
        (HIGH_KEY, "100"),
        (LOW_KEY, "100"),
        (CLOSE_KEY, "100"),
        (VOLUME_KEY, "100"),
    ];

    #[test]
    fn test_completely_parseable_row() {
        let record = parse_row(day(), &fields(&FULL)).unwrap();
        assert_eq!(record.date, day());
        assert_eq!(
            record.ohlc,
            Ohlc {
                open: dec!(100),
                high: dec!(100),
                low: dec!(100),
                close: dec!(100),
            }
        );
        assert_eq!(record.volume, 100);
    }

    #[test]
    fn test_decimal_precision_is_kept() {
        let row = fields(&[
            (OPEN_KEY, "221.9800"),
            (HIGH_KEY, "224.4000"),
            (LOW_KEY, "220.3500"),
            (CLOSE_KEY, "223.2600"),
            (VOLUME_KEY, "4759490"),
        ]);
        let record = parse_row(day(), &row).unwrap();
        assert_eq!(record.ohlc.open, dec!(221.98));
        assert_eq!(record.ohlc.close.to_string(), "223.2600");
        assert_eq!(record.volume, 4_759_490);
    }

    #[test]
    fn test_missing_field_reported_in_fixed_order() {
        // 逐个截断字段表，报告的总是第一个缺失字段
        let names = ["open", "high", "low", "close", "volume"];
        for (i, name) in names.iter().enumerate() {
            let row = fields(&FULL[..i]);
            let err = parse_row(day(), &row).unwrap_err();
            assert_eq!(err, UpstreamError::FieldMissing(name.to_string()));
        }
    }

    #[test]
    fn test_first_missing_wins_when_several_are_absent() {
        let row = fields(&[(OPEN_KEY, "1"), (CLOSE_KEY, "1")]);
        let err = parse_row(day(), &row).unwrap_err();
        assert_eq!(err, UpstreamError::FieldMissing("high".into()));
    }

    #[test]
    fn test_unparseable_field_is_named() {
        let names = ["open", "high", "low", "close", "volume"];
        for (i, name) in names.iter().enumerate() {
            let mut row = fields(&FULL);
            row.insert(FULL[i].0.to_string(), "one hundred".to_string());
            match parse_row(day(), &row) {
                Err(UpstreamError::FieldUnparseable { field, .. }) => assert_eq!(field, *name),
                other => panic!("expected FieldUnparseable for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_volume_rejects_fraction_and_sign() {
        for bad in ["100.5", "-1", "1e3", ""] {
            let mut row = fields(&FULL);
            row.insert(VOLUME_KEY.to_string(), bad.to_string());
            let err = parse_row(day(), &row).unwrap_err();
            assert!(
                matches!(err, UpstreamError::FieldUnparseable { ref field, .. } if field == "volume"),
                "volume {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_message_carries_upstream_prefix() {
        let err = parse_row(day(), &fields(&[])).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Alpha Vantage API response-body-parse error: ")
        );
    }
}
