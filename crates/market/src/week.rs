use chrono::Weekday;
use stockfeed_core::common::TradeDate;
use stockfeed_core::market::entity::{DailyPriceRecord, WeekBucket};

/// # Summary
/// 把按日期升序排列的日线记录切分为自然周分桶。
///
/// # Logic
/// 1. 首个周一：从 `boundary` 向后找到第一个周一 (包含当天)。
///    若第一条记录早于该周一，则改用记录所在周的周一。
/// 2. 遍历记录，日期晚于当前周五时关闭当前分桶，以记录所在周的周一开启新分桶。
/// 3. 只输出至少包含一条记录的分桶，空输入返回空列表。
///
/// # Arguments
/// * `boundary`: 窗口起始日期，通常来自 `trailing_window_start`。
/// * `records`: 已按日期升序排列的日线记录。
///
/// # Returns
/// 按时间升序排列的周分桶，依次展开后与输入序列完全一致。
///
/// # Invariants
/// - 周末日期的记录归入其后一周。
pub fn bucket_weeks(boundary: TradeDate, records: &[DailyPriceRecord]) -> Vec<WeekBucket> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut monday = boundary.next_on_or_after(Weekday::Mon);
    if first.date < monday {
        monday = week_monday(first.date);
    }

    let mut weeks = Vec::new();
    let mut current = WeekBucket::starting(monday);
    for record in records {
        if record.date > current.friday {
            let next = WeekBucket::starting(week_monday(record.date));
            let closed = std::mem::replace(&mut current, next);
            if !closed.daily_data.is_empty() {
                weeks.push(closed);
            }
        }
        current.daily_data.push(record.clone());
    }
    weeks.push(current);

    tracing::trace!(records = records.len(), weeks = weeks.len(), "bucketed daily records");
    weeks
}

// 工作日取本周周一，周末取下周一
fn week_monday(date: TradeDate) -> TradeDate {
    if date.is_weekend() {
        date.next_on_or_after(Weekday::Mon)
    } else {
        date.prev_on_or_before(Weekday::Mon)
    }
}
