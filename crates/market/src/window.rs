use chrono::Weekday;
use stockfeed_core::common::TradeDate;

/// # Summary
/// 计算尾部保留窗口的起始日期 (包含)。
///
/// # Logic
/// 1. `earliest = last_refreshed - (days - 1)`，`days` 为 0 时按 1 处理。
/// 2. 从 `earliest` 逐日向前回溯，直到落在周六或周日。
/// 3. `earliest` 本身已是周末时直接返回。
/// 4. 回溯越过最早可表示日期时，取该日期起的第一个周末。
///
/// # Arguments
/// * `last_refreshed`: 上游数据最后刷新日期。
/// * `days`: 希望保留的日历天数。
///
/// # Returns
/// 恒为周六或周日；未越界时不晚于 `earliest`。
pub fn trailing_window_start(last_refreshed: TradeDate, days: u32) -> TradeDate {
    let span = i64::from(days.max(1)) - 1;
    let Some(mut start) = last_refreshed.checked_add_days(-span) else {
        return first_weekend_from(TradeDate::MIN);
    };
    while !start.is_weekend() {
        match start.checked_add_days(-1) {
            Some(prev) => start = prev,
            None => return first_weekend_from(start),
        }
    }
    start
}

fn first_weekend_from(day: TradeDate) -> TradeDate {
    day.next_on_or_after(Weekday::Sat)
        .min(day.next_on_or_after(Weekday::Sun))
}
