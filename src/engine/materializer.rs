// ==========================================
// 输液袋更换排程系统 - 袋实体生成引擎
// ==========================================
// 红线: 袋 i 的开始日期 == 袋 i-1 的结束日期
// ==========================================
// 职责: 从起始日期向前推进，生成带容量/流速的袋列表
// 输入: start_date + 时长列表
// 输出: Vec<Bag>
// ==========================================

use crate::domain::bag::{Bag, InfusionParams};
use chrono::{Days, NaiveDate};
use tracing::instrument;

// ==========================================
// 临床常量表（固定值，不推导）
// ==========================================
// | 天数 | 容量   | 流速        |
// | 1    | 240 ml | 10 ml/hr   |
// | 2    | 240 ml | 5 ml/hr    |
// | 3    | 130 ml | 1.8 ml/hr  |
// | 4    | 173 ml | 1.8 ml/hr  |
// | 7    | 101 ml | 0.6 ml/hr  |
// | 其他 | TBD    | TBD        |
const INFUSION_TABLE: [(i32, InfusionParams); 5] = [
    (1, InfusionParams { volume_ml: 240, rate_ml_per_hr: 10.0 }),
    (2, InfusionParams { volume_ml: 240, rate_ml_per_hr: 5.0 }),
    (3, InfusionParams { volume_ml: 130, rate_ml_per_hr: 1.8 }),
    (4, InfusionParams { volume_ml: 173, rate_ml_per_hr: 1.8 }),
    (7, InfusionParams { volume_ml: 101, rate_ml_per_hr: 0.6 }),
];

/// 按时长查临床参数；无表项返回 None（显示为 TBD）
pub fn infusion_params_for(duration_days: i32) -> Option<InfusionParams> {
    INFUSION_TABLE
        .iter()
        .find(|(days, _)| *days == duration_days)
        .map(|(_, params)| *params)
}

// ==========================================
// BagMaterializer - 袋实体生成引擎
// ==========================================
pub struct BagMaterializer {}

impl Default for BagMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl BagMaterializer {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成袋列表
    ///
    /// 袋 0 从 start_date 开始；end_date = start_date + duration_days
    ///
    /// 结束日期无法表示时停止，返回已生成部分
    #[instrument(skip(self, durations), fields(count = durations.len()))]
    pub fn materialize(&self, start_date: NaiveDate, durations: &[i32]) -> Vec<Bag> {
        let mut bags = Vec::with_capacity(durations.len());
        let mut cursor = start_date;

        for (index, &duration_days) in durations.iter().enumerate() {
            let end_date = match cursor.checked_add_days(Days::new(duration_days.max(0) as u64)) {
                Some(d) => d,
                None => {
                    tracing::warn!(index, %cursor, duration_days, "结束日期超出可表示范围，停止生成");
                    break;
                }
            };
            let infusion = infusion_params_for(duration_days);
            if infusion.is_none() {
                tracing::debug!(index, duration_days, "时长无临床表项，显示 TBD");
            }

            bags.push(Bag {
                index,
                duration_days,
                start_date: cursor,
                end_date,
                infusion,
            });
            cursor = end_date;
        }

        bags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_infusion_table_exact_values() {
        let p1 = infusion_params_for(1).unwrap();
        assert_eq!((p1.volume_ml, p1.rate_ml_per_hr), (240, 10.0));
        let p2 = infusion_params_for(2).unwrap();
        assert_eq!((p2.volume_ml, p2.rate_ml_per_hr), (240, 5.0));
        let p3 = infusion_params_for(3).unwrap();
        assert_eq!((p3.volume_ml, p3.rate_ml_per_hr), (130, 1.8));
        let p4 = infusion_params_for(4).unwrap();
        assert_eq!((p4.volume_ml, p4.rate_ml_per_hr), (173, 1.8));
        let p7 = infusion_params_for(7).unwrap();
        assert_eq!((p7.volume_ml, p7.rate_ml_per_hr), (101, 0.6));
    }

    #[test]
    fn test_five_and_six_day_bags_are_tbd() {
        assert!(infusion_params_for(5).is_none());
        assert!(infusion_params_for(6).is_none());
    }

    #[test]
    fn test_materialize_walks_dates_forward() {
        let engine = BagMaterializer::new();
        let bags = engine.materialize(d(2026, 3, 3), &[2, 3, 7]);

        assert_eq!(bags.len(), 3);
        assert_eq!(bags[0].start_date, d(2026, 3, 3));
        assert_eq!(bags[0].end_date, d(2026, 3, 5));
        assert_eq!(bags[1].start_date, d(2026, 3, 5));
        assert_eq!(bags[1].end_date, d(2026, 3, 8));
        assert_eq!(bags[2].start_date, d(2026, 3, 8));
        assert_eq!(bags[2].end_date, d(2026, 3, 15));
        assert_eq!(bags[2].index, 2);
        assert_eq!(bags[2].volume_ml(), Some(101));
    }

    #[test]
    fn test_materialize_crosses_month_boundary() {
        let engine = BagMaterializer::new();
        let bags = engine.materialize(d(2026, 2, 26), &[7]);
        assert_eq!(bags[0].end_date, d(2026, 3, 5));
    }

    #[test]
    fn test_materialize_stops_at_calendar_end() {
        let engine = BagMaterializer::new();
        let start = NaiveDate::MAX - chrono::Duration::days(10);
        let bags = engine.materialize(start, &[7, 3, 7]);

        assert_eq!(bags.len(), 2);
        assert_eq!(bags[1].end_date, NaiveDate::MAX);
    }

    #[test]
    fn test_materialize_empty() {
        let engine = BagMaterializer::new();
        assert!(engine.materialize(d(2026, 3, 3), &[]).is_empty());
    }
}
