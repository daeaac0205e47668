// ==========================================
// 输液袋更换排程系统 - 打印日历投影引擎
// ==========================================
// 红线: 投影不做提醒判定，只按日期摆放已判定事件
// ==========================================
// 职责: 袋列表 + 拔管日期 → 月份网格（周日..周六）
// 输入: Vec<Bag> + Vec<BagAlert> + disconnect_date + 可选月份范围
// 输出: Vec<MonthGrid>
// ==========================================

use crate::domain::bag::Bag;
use crate::domain::calendar::{
    BagStartEvent, CalendarCell, CalendarEvent, CalendarWeek, MonthGrid, MonthRange,
    DAYS_PER_WEEK,
};
use crate::engine::alert::BagAlert;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// CalendarProjector - 打印日历投影引擎
// ==========================================
pub struct CalendarProjector {}

impl Default for CalendarProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarProjector {
    pub fn new() -> Self {
        Self {}
    }

    /// 投影月份网格
    ///
    /// # 参数
    /// - `bags`: 已生成的袋列表
    /// - `alerts`: 与袋一一对应的提醒结果（缺失时视为无重设泵/无 RN 上门）
    /// - `disconnect_date`: 拔管日期
    /// - `range`: 月份范围；None 时取 最早换袋日 .. 拔管日（最多 MAX_MONTH_SPAN 个月）
    #[instrument(skip(self, bags, alerts), fields(count = bags.len()))]
    pub fn project(
        &self,
        bags: &[Bag],
        alerts: &[BagAlert],
        disconnect_date: Option<NaiveDate>,
        range: Option<MonthRange>,
    ) -> Vec<MonthGrid> {
        let range = match range.or_else(|| Self::derive_range(bags, disconnect_date)) {
            Some(r) => r,
            None => return Vec::new(),
        };

        let events = Self::collect_events(bags, alerts, disconnect_date);

        range
            .months()
            .into_iter()
            .filter_map(|(year, month)| Self::build_month(year, month, &events))
            .collect()
    }

    /// 默认范围: 最早换袋日 .. 拔管日（闭区间）
    fn derive_range(bags: &[Bag], disconnect_date: Option<NaiveDate>) -> Option<MonthRange> {
        let earliest = bags.iter().map(|b| b.start_date).min()?;
        let latest = disconnect_date
            .or_else(|| bags.iter().map(|b| b.end_date).max())
            .unwrap_or(earliest);
        Some(MonthRange::spanning(earliest, latest))
    }

    /// 按日期汇总事件（同日多事件按袋序保留，拔管事件在最后）
    fn collect_events(
        bags: &[Bag],
        alerts: &[BagAlert],
        disconnect_date: Option<NaiveDate>,
    ) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        let mut events: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();

        for bag in bags {
            let alert = alerts.iter().find(|a| a.bag_index == bag.index);
            events
                .entry(bag.start_date)
                .or_default()
                .push(CalendarEvent::Bag(BagStartEvent {
                    bag_index: bag.index,
                    duration_days: bag.duration_days,
                    volume_label: bag.volume_label(),
                    rate_label: bag.rate_label(),
                    reprogram: alert.is_some_and(|a| a.duration_changed),
                    rn_visit: alert.is_some_and(|a| a.rn_visit_required),
                }));
        }

        if let Some(date) = disconnect_date {
            events.entry(date).or_default().push(CalendarEvent::FinalDisconnect);
        }

        events
    }

    /// 构建单月网格，首周前置空白格，末周补齐空白格
    fn build_month(
        year: i32,
        month: u32,
        events: &BTreeMap<NaiveDate, Vec<CalendarEvent>>,
    ) -> Option<MonthGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let leading = first.weekday().num_days_from_sunday() as usize;

        let mut weeks: Vec<CalendarWeek> = Vec::new();
        let mut week: CalendarWeek = Default::default();
        let mut column = leading;

        let mut cursor = Some(first);
        while let Some(date) = cursor.filter(|d| d.month() == month) {
            let mut cell = CalendarCell::new(date);
            if let Some(day_events) = events.get(&date) {
                cell.events = day_events.clone();
            }
            week[column] = Some(cell);
            column += 1;

            if column == DAYS_PER_WEEK {
                weeks.push(std::mem::take(&mut week));
                column = 0;
            }
            cursor = date.succ_opt();
        }

        if column > 0 {
            weeks.push(week);
        }

        Some(MonthGrid { year, month, weeks })
    }
}
