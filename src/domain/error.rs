// ==========================================
// 输液袋更换排程系统 - 排程输入错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 仅用于输入解析阶段；引擎本身不返回错误
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 排程输入错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleInputError {
    #[error("缺少字段: {0}")]
    MissingField(&'static str),

    #[error("日期格式无法解析 (field={field}): {raw}")]
    InvalidDate { field: &'static str, raw: String },

    #[error("周期天数必须大于 0: {0}")]
    NonPositiveCycle(i32),

    #[error("周期天数超过上限: {days} > {max}")]
    CycleTooLong { days: i32, max: usize },

    #[error("周期结束日期超出可表示范围: {start} + {days} 天")]
    DateOutOfRange { start: NaiveDate, days: i32 },

    #[error("月份范围无效: {first_year}-{first_month} .. {last_year}-{last_month}")]
    InvalidMonthRange {
        first_year: i32,
        first_month: u32,
        last_year: i32,
        last_month: u32,
    },

    #[error("覆写位置越界: index={index}, 上限={max}")]
    OverrideIndexOutOfRange { index: usize, max: usize },

    #[error("覆写时长越界: index={index}, value={value}")]
    OverrideValueOutOfRange { index: usize, value: i32 },
}
