// ==========================================
// 输液袋更换排程系统 - 治疗周期
// ==========================================

use crate::domain::error::ScheduleInputError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// 建模的最大周期天数（同时是袋数量上限）
pub const MAX_CYCLE_DAYS: usize = 28;

/// 支持的日期格式（按顺序尝试）
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// 治疗周期定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSpec {
    /// 周期总天数（> 0）
    pub total_cycle_days: i32,
    /// 医院给药开始日期
    pub cycle_start_date: NaiveDate,
    /// 居家方案开始日期（排程起点）
    pub schedule_start_date: NaiveDate,
    /// 无防腐剂（每袋只能 1 天）
    pub is_preservative_free: bool,
}

impl CycleSpec {
    pub fn new(
        total_cycle_days: i32,
        cycle_start_date: NaiveDate,
        schedule_start_date: NaiveDate,
        is_preservative_free: bool,
    ) -> Result<Self, ScheduleInputError> {
        if total_cycle_days <= 0 {
            return Err(ScheduleInputError::NonPositiveCycle(total_cycle_days));
        }
        if total_cycle_days as usize > MAX_CYCLE_DAYS {
            return Err(ScheduleInputError::CycleTooLong {
                days: total_cycle_days,
                max: MAX_CYCLE_DAYS,
            });
        }
        // 最后一袋结束日期（拔管日）必须可表示
        if schedule_start_date
            .checked_add_days(Days::new(total_cycle_days as u64))
            .is_none()
        {
            return Err(ScheduleInputError::DateOutOfRange {
                start: schedule_start_date,
                days: total_cycle_days,
            });
        }

        Ok(Self {
            total_cycle_days,
            cycle_start_date,
            schedule_start_date,
            is_preservative_free,
        })
    }

    /// 已过天数 = max(0, 排程起点 - 周期起点)
    pub fn days_elapsed(&self) -> i32 {
        let days = (self.schedule_start_date - self.cycle_start_date).num_days();
        days.max(0) as i32
    }

    /// 剩余天数 = 周期总天数 - 已过天数（可能 ≤ 0）
    pub fn remaining_days(&self) -> i32 {
        self.total_cycle_days - self.days_elapsed()
    }

    /// 是否需要生成排程
    pub fn has_remaining_days(&self) -> bool {
        self.remaining_days() > 0
    }
}

/// 解析日期字符串
///
/// 支持 `2026-03-01` 与 `03/01/2026` 两种写法，首尾空白忽略
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ScheduleInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScheduleInputError::MissingField(field));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ScheduleInputError::InvalidDate {
            field,
            raw: raw.to_string(),
        })
}
