// ==========================================
// 输液袋更换排程系统 - 打印日历结构
// ==========================================

use crate::domain::error::ScheduleInputError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 每周列数（周日..周六）
pub const DAYS_PER_WEEK: usize = 7;

/// 换袋事件载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagStartEvent {
    pub bag_index: usize,
    pub duration_days: i32,
    pub volume_label: String,
    pub rate_label: String,
    /// 与上一袋时长不同，需要重新设置泵
    pub reprogram: bool,
    /// 需要 RN 上门
    pub rn_visit: bool,
}

/// 日历事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarEvent {
    Bag(BagStartEvent),
    FinalDisconnect,
}

/// 日历单元格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

impl CalendarCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
        }
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// 一周（7 列，None 为空白格）
pub type CalendarWeek = [Option<CalendarCell>; DAYS_PER_WEEK];

/// 月份网格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<CalendarWeek>,
}

impl MonthGrid {
    /// 查找某日的单元格
    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        if date.year() != self.year || date.month() != self.month {
            return None;
        }
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .flatten()
            .find(|cell| cell.date == date)
    }

    /// 所有非空白单元格（按日期顺序）
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|week| week.iter()).flatten()
    }
}

/// 单次投影最多月份数
pub const MAX_MONTH_SPAN: usize = 24;

/// 未经校验的月份范围（序列化形态: `{"first":[2026,3],"last":[2026,4]}`）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthRangeRaw {
    pub first: (i32, u32),
    pub last: (i32, u32),
}

/// 月份范围（闭区间）
///
/// 只能经 `new` / `spanning` 构造；反序列化同样走 `new` 校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MonthRangeRaw", into = "MonthRangeRaw")]
pub struct MonthRange {
    first: (i32, u32),
    last: (i32, u32),
}

/// (年, 月) → 自公元 0 年 1 月起的月序号
fn month_ordinal((year, month): (i32, u32)) -> i64 {
    year as i64 * 12 + month as i64 - 1
}

fn from_ordinal(ordinal: i64) -> (i32, u32) {
    (ordinal.div_euclid(12) as i32, ordinal.rem_euclid(12) as u32 + 1)
}

/// 月份可落在 chrono 可表示的日期上
fn is_representable((year, month): (i32, u32)) -> bool {
    NaiveDate::from_ymd_opt(year, month, 1).is_some()
}

impl MonthRange {
    /// 显式月份范围
    ///
    /// 校验: 月份 1..=12 且可表示; first ≤ last; 跨度 ≤ MAX_MONTH_SPAN
    pub fn new(first: (i32, u32), last: (i32, u32)) -> Result<Self, ScheduleInputError> {
        let span = month_ordinal(last) - month_ordinal(first) + 1;
        let valid = is_representable(first)
            && is_representable(last)
            && span >= 1
            && span <= MAX_MONTH_SPAN as i64;

        if !valid {
            return Err(ScheduleInputError::InvalidMonthRange {
                first_year: first.0,
                first_month: first.1,
                last_year: last.0,
                last_month: last.1,
            });
        }

        Ok(Self { first, last })
    }

    /// 覆盖两个日期所在月份
    ///
    /// 跨度超过 MAX_MONTH_SPAN 时 `months()` 只列出前 MAX_MONTH_SPAN 个月
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        Self {
            first: (lo.year(), lo.month()),
            last: (hi.year(), hi.month()),
        }
    }

    pub fn first(&self) -> (i32, u32) {
        self.first
    }

    pub fn last(&self) -> (i32, u32) {
        self.last
    }

    /// 按顺序列出范围内所有 (年, 月)，最多 MAX_MONTH_SPAN 个
    pub fn months(&self) -> Vec<(i32, u32)> {
        let first = month_ordinal(self.first);
        let span = month_ordinal(self.last) - first + 1;
        if span <= 0 {
            return Vec::new();
        }
        if span > MAX_MONTH_SPAN as i64 {
            tracing::warn!(span, max = MAX_MONTH_SPAN, "月份范围过宽，已截断");
        }

        (0..span.min(MAX_MONTH_SPAN as i64))
            .map(|i| from_ordinal(first + i))
            .collect()
    }
}

impl TryFrom<MonthRangeRaw> for MonthRange {
    type Error = ScheduleInputError;

    fn try_from(raw: MonthRangeRaw) -> Result<Self, Self::Error> {
        Self::new(raw.first, raw.last)
    }
}

impl From<MonthRange> for MonthRangeRaw {
    fn from(range: MonthRange) -> Self {
        Self {
            first: range.first,
            last: range.last,
        }
    }
}
