use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// # Summary
/// 交易日期值类型，只承载日历日粒度 (不含时分秒与时区)。
///
/// # Invariants
/// - 序列化格式固定为 `YYYY-MM-DD`。
/// - 仅暴露日粒度运算 (星期、加减天数、比较)，不可退化为完整时间戳。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(NaiveDate);

impl TradeDate {
    /// 固定的 ISO 日期格式
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// 可表示的最早日期
    pub const MIN: Self = Self(NaiveDate::MIN);

    /// 可表示的最晚日期
    pub const MAX: Self = Self(NaiveDate::MAX);

    /// # Summary
    /// 由年月日构造交易日期。
    ///
    /// # Returns
    /// 日期非法 (如 2 月 30 日) 时返回 None。
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// 该日期是星期几
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// 是否为周六或周日
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// # Summary
    /// 日期平移指定天数，负数表示向前回溯。
    ///
    /// # Returns
    /// 超出可表示范围时返回 None。
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// # Summary
    /// 日期平移指定天数，越界时饱和到 `MIN` / `MAX`。
    pub fn add_days(&self, days: i64) -> Self {
        self.checked_add_days(days)
            .unwrap_or(if days < 0 { Self::MIN } else { Self::MAX })
    }

    /// # Summary
    /// 从当前日期向后查找第一个指定星期几 (包含当天)。
    ///
    /// # Logic
    /// 1. 计算两个星期序号在模 7 意义下的差值。
    /// 2. 向后平移该差值天数。
    pub fn next_on_or_after(&self, target: Weekday) -> Self {
        let from = self.weekday().num_days_from_monday();
        let to = target.num_days_from_monday();
        self.add_days(i64::from((to + 7 - from) % 7))
    }

    /// # Summary
    /// 从当前日期向前查找第一个指定星期几 (包含当天)。
    pub fn prev_on_or_before(&self, target: Weekday) -> Self {
        let from = self.weekday().num_days_from_monday();
        let to = target.num_days_from_monday();
        self.add_days(-i64::from((from + 7 - to) % 7))
    }

    /// 内部的 chrono 日期
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TradeDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for TradeDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, Self::FORMAT).map(Self)
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for TradeDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> TradeDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let d = date("2025-06-13");
        assert_eq!(d.to_string(), "2025-06-13");
        assert_eq!(d.weekday(), Weekday::Fri);
        assert!("2025-13-01".parse::<TradeDate>().is_err());
        assert!("bad date".parse::<TradeDate>().is_err());
    }

    #[test]
    fn test_weekday_navigation() {
        // 2025-06-11 是周三
        let wed = date("2025-06-11");
        assert_eq!(wed.next_on_or_after(Weekday::Mon), date("2025-06-16"));
        assert_eq!(wed.prev_on_or_before(Weekday::Mon), date("2025-06-09"));
        assert_eq!(wed.next_on_or_after(Weekday::Wed), wed);
        assert_eq!(wed.prev_on_or_before(Weekday::Wed), wed);

        let sun = date("2025-06-08");
        assert!(sun.is_weekend());
        assert_eq!(sun.next_on_or_after(Weekday::Mon), date("2025-06-09"));
    }

    #[test]
    fn test_add_days_crosses_month() {
        assert_eq!(date("2025-05-30").add_days(4), date("2025-06-03"));
        assert_eq!(date("2025-06-03").add_days(-4), date("2025-05-30"));
    }

    #[test]
    fn test_add_days_saturates_out_of_range() {
        let d = date("2025-06-13");
        assert_eq!(d.checked_add_days(-200_000_000), None);
        assert_eq!(d.checked_add_days(i64::MIN), None);
        assert_eq!(d.add_days(-200_000_000), TradeDate::MIN);
        assert_eq!(d.add_days(i64::MAX), TradeDate::MAX);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let d = date("2025-06-02");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-06-02\"");
        let back: TradeDate = serde_json::from_str("\"2025-06-02\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<TradeDate>("\"02/06/2025\"").is_err());
    }
}
