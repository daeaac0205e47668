// ==========================================
// 输液袋更换排程系统 - 换袋提醒判定引擎
// ==========================================
// 红线: 优先级 抽吸 > RN 上门 > 常规换袋; 所有判定必须输出 reason
// ==========================================
// 职责: 逐袋与上一袋比较，判定今日/明日提醒 + 拔管提醒
// 输入: Vec<Bag> + CareFlags + RnVisitFlags + today
// 输出: AlertSummary (per_bag, disconnect, row_needs_attention)
// ==========================================

use crate::domain::bag::Bag;
use crate::domain::overrides::RnVisitFlags;
use crate::domain::patient::CareFlags;
use crate::domain::types::{AlertState, DisconnectAlert};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

/// 单袋提醒结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagAlert {
    pub bag_index: usize,
    pub state: AlertState,
    /// 与上一袋时长不同（任意日期）
    pub duration_changed: bool,
    /// 时长变化且今日开始，需重新设泵
    pub pump_reprogram_today: bool,
    /// 时长缩短，需抽吸管路
    pub aspiration_required: bool,
    /// 患者/家属换袋 且 临床标记 RN 上门
    pub rn_visit_required: bool,
    /// JSON 格式的判定原因
    pub reason: String,
}

/// 整行提醒结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub per_bag: Vec<BagAlert>,
    /// 拔管日期 = 最后一袋结束日期
    pub disconnect_date: Option<NaiveDate>,
    pub disconnect_alert: DisconnectAlert,
    pub row_needs_attention: bool,
}

impl AlertSummary {
    pub fn empty() -> Self {
        Self {
            per_bag: Vec::new(),
            disconnect_date: None,
            disconnect_alert: DisconnectAlert::None,
            row_needs_attention: false,
        }
    }

    pub fn states(&self) -> Vec<AlertState> {
        self.per_bag.iter().map(|a| a.state).collect()
    }
}

/// 相对今日的日期位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayOffset {
    Today,
    Tomorrow,
    Other,
}

fn day_offset(date: NaiveDate, today: NaiveDate) -> DayOffset {
    if date == today {
        DayOffset::Today
    } else if today.succ_opt() == Some(date) {
        DayOffset::Tomorrow
    } else {
        DayOffset::Other
    }
}

// ==========================================
// AlertClassifier - 换袋提醒判定引擎
// ==========================================
pub struct AlertClassifier {}

impl Default for AlertClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertClassifier {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定整行提醒
    #[instrument(skip(self, bags, care, rn_visits), fields(count = bags.len()))]
    pub fn classify(
        &self,
        bags: &[Bag],
        care: &CareFlags,
        rn_visits: &RnVisitFlags,
        today: NaiveDate,
    ) -> AlertSummary {
        if bags.is_empty() {
            return AlertSummary::empty();
        }

        let caregiver_managed = care.is_caregiver_managed();
        let per_bag: Vec<BagAlert> = bags
            .iter()
            .enumerate()
            .map(|(i, bag)| {
                let previous = if i > 0 { bags.get(i - 1) } else { None };
                self.classify_bag(bag, previous, caregiver_managed, rn_visits.get(i), today)
            })
            .collect();

        let disconnect_date = bags.last().map(|b| b.end_date);
        let disconnect_alert = disconnect_date
            .map(|date| self.classify_disconnect(date, today))
            .unwrap_or(DisconnectAlert::None);

        let row_needs_attention =
            per_bag.iter().any(|a| a.state.is_active()) || disconnect_alert.is_active();

        if row_needs_attention {
            tracing::debug!(
                ?disconnect_alert,
                active = per_bag.iter().filter(|a| a.state.is_active()).count(),
                "该行需要关注"
            );
        }

        AlertSummary {
            per_bag,
            disconnect_date,
            disconnect_alert,
            row_needs_attention,
        }
    }

    /// 单袋判定
    ///
    /// 顺序（优先级递减）:
    /// 1) 时长缩短 且 今日/明日开始 → AspirationToday / AspirationTomorrow
    /// 2) 患者/家属换袋 且 RN 标记 且 今日/明日开始 → RnVisitToday / RnVisitTomorrow
    /// 3) 非患者/家属换袋 且 今日/明日开始 → TodayRoutine / TomorrowRoutine
    /// 4) 默认 → None
    ///
    /// 重新设泵: 时长变化 且 今日开始（与方向无关，独立于 state）
    pub fn classify_bag(
        &self,
        bag: &Bag,
        previous: Option<&Bag>,
        caregiver_managed: bool,
        rn_visit_flag: bool,
        today: NaiveDate,
    ) -> BagAlert {
        let offset = day_offset(bag.start_date, today);
        let duration_changed = previous.is_some_and(|p| p.duration_days != bag.duration_days);
        let aspiration_required = previous.is_some_and(|p| bag.duration_days < p.duration_days);
        let rn_visit_required = caregiver_managed && rn_visit_flag;
        let pump_reprogram_today = duration_changed && offset == DayOffset::Today;

        let (state, rule) = match offset {
            DayOffset::Other => (AlertState::None, "NOT_DUE"),
            DayOffset::Today if aspiration_required => (AlertState::AspirationToday, "ASPIRATION"),
            DayOffset::Tomorrow if aspiration_required => {
                (AlertState::AspirationTomorrow, "ASPIRATION")
            }
            DayOffset::Today if rn_visit_required => (AlertState::RnVisitToday, "RN_VISIT"),
            DayOffset::Tomorrow if rn_visit_required => (AlertState::RnVisitTomorrow, "RN_VISIT"),
            DayOffset::Today if !caregiver_managed => (AlertState::TodayRoutine, "ROUTINE"),
            DayOffset::Tomorrow if !caregiver_managed => (AlertState::TomorrowRoutine, "ROUTINE"),
            _ => (AlertState::None, "CAREGIVER_CHANGE"),
        };

        let reason = json!({
            "state": state.to_string(),
            "primary_reason": rule,
            "details": {
                "bag_index": bag.index,
                "start_date": bag.start_date.to_string(),
                "today": today.to_string(),
                "duration_days": bag.duration_days,
                "previous_duration_days": previous.map(|p| p.duration_days),
                "caregiver_managed": caregiver_managed,
                "rn_visit_flag": rn_visit_flag,
                "pump_reprogram_today": pump_reprogram_today,
            }
        });

        BagAlert {
            bag_index: bag.index,
            state,
            duration_changed,
            pump_reprogram_today,
            aspiration_required,
            rn_visit_required,
            reason: reason.to_string(),
        }
    }

    /// 拔管提醒（与袋级提醒独立）
    pub fn classify_disconnect(&self, disconnect_date: NaiveDate, today: NaiveDate) -> DisconnectAlert {
        match day_offset(disconnect_date, today) {
            DayOffset::Today => DisconnectAlert::DisconnectToday,
            DayOffset::Tomorrow => DisconnectAlert::DisconnectTomorrow,
            DayOffset::Other => DisconnectAlert::None,
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::materializer::BagMaterializer;
    use chrono::Duration;

    /// 基准日期: 2026-03-10
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn bags_from(start: NaiveDate, durations: &[i32]) -> Vec<Bag> {
        BagMaterializer::new().materialize(start, durations)
    }

    fn rn_care() -> CareFlags {
        CareFlags::new("RN")
    }

    fn pt_care() -> CareFlags {
        CareFlags::new("Pt/Caregiver")
    }

    // ==========================================
    // 第一部分：正常案例
    // ==========================================

    #[test]
    fn test_scenario_5_aspiration_tomorrow() {
        // 场景5: [7,3]，第二袋明日开始
        let start = today() + Duration::days(1) - Duration::days(7);
        let bags = bags_from(start, &[7, 3]);
        let summary = AlertClassifier::new().classify(&bags, &rn_care(), &RnVisitFlags::none(), today());

        assert_eq!(summary.per_bag[1].state, AlertState::AspirationTomorrow);
        assert!(summary.per_bag[1].aspiration_required);
        assert!(!summary.per_bag[1].pump_reprogram_today);
        assert!(summary.per_bag[1].reason.contains("ASPIRATION"));
        assert!(summary.row_needs_attention);
    }

    #[test]
    fn test_aspiration_today_with_reprogram() {
        let start = today() - Duration::days(7);
        let bags = bags_from(start, &[7, 3]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &RnVisitFlags::none(), today());

        assert_eq!(summary.per_bag[1].state, AlertState::AspirationToday);
        assert!(summary.per_bag[1].pump_reprogram_today);
    }

    #[test]
    fn test_scenario_6_rn_visit_today_for_caregiver() {
        // 场景6: 患者/家属换袋，今日开始的袋标记 RN 上门
        let bags = bags_from(today(), &[3, 4]);
        let rn_visits = RnVisitFlags::from_raw(&[true, false]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &rn_visits, today());

        assert_eq!(summary.per_bag[0].state, AlertState::RnVisitToday);
        assert!(summary.per_bag[0].rn_visit_required);
        assert!(summary.row_needs_attention);
    }

    #[test]
    fn test_rn_visit_tomorrow() {
        let bags = bags_from(today() + Duration::days(1), &[3]);
        let rn_visits = RnVisitFlags::from_raw(&[true]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &rn_visits, today());
        assert_eq!(summary.per_bag[0].state, AlertState::RnVisitTomorrow);
    }

    #[test]
    fn test_routine_today_and_tomorrow_for_nurse_managed() {
        // 今日开始 1 天袋，明日开始下一袋
        let bags = bags_from(today(), &[1, 1, 2]);
        let summary = AlertClassifier::new().classify(&bags, &rn_care(), &RnVisitFlags::none(), today());

        assert_eq!(summary.per_bag[0].state, AlertState::TodayRoutine);
        assert_eq!(summary.per_bag[1].state, AlertState::TomorrowRoutine);
        assert_eq!(summary.per_bag[2].state, AlertState::None);
    }

    #[test]
    fn test_caregiver_without_rn_flag_has_no_bag_alert() {
        let bags = bags_from(today() + Duration::days(3), &[7]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &RnVisitFlags::none(), today());
        assert_eq!(summary.states(), vec![AlertState::None]);
        assert!(!summary.row_needs_attention);

        let bags = bags_from(today(), &[7]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &RnVisitFlags::none(), today());
        assert_eq!(summary.per_bag[0].state, AlertState::None);
        assert!(summary.per_bag[0].reason.contains("CAREGIVER_CHANGE"));
    }

    // ==========================================
    // 第二部分：优先级与边界
    // ==========================================

    #[test]
    fn test_aspiration_beats_rn_visit() {
        let start = today() - Duration::days(7);
        let bags = bags_from(start, &[7, 2]);
        let rn_visits = RnVisitFlags::from_raw(&[false, true]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &rn_visits, today());

        assert_eq!(summary.per_bag[1].state, AlertState::AspirationToday);
        assert!(summary.per_bag[1].rn_visit_required);
    }

    #[test]
    fn test_lengthening_is_reprogram_not_aspiration() {
        let start = today() - Duration::days(3);
        let bags = bags_from(start, &[3, 7]);
        let summary = AlertClassifier::new().classify(&bags, &rn_care(), &RnVisitFlags::none(), today());

        let alert = &summary.per_bag[1];
        assert_eq!(alert.state, AlertState::TodayRoutine);
        assert!(alert.duration_changed);
        assert!(alert.pump_reprogram_today);
        assert!(!alert.aspiration_required);
    }

    #[test]
    fn test_rn_flag_ignored_when_not_caregiver_managed() {
        let bags = bags_from(today(), &[3]);
        let rn_visits = RnVisitFlags::from_raw(&[true]);
        let summary = AlertClassifier::new().classify(&bags, &rn_care(), &rn_visits, today());

        assert_eq!(summary.per_bag[0].state, AlertState::TodayRoutine);
        assert!(!summary.per_bag[0].rn_visit_required);
    }

    #[test]
    fn test_disconnect_alert_drives_row_attention() {
        // 患者/家属换袋，无袋级提醒，但明日拔管
        let start = today() + Duration::days(1) - Duration::days(7);
        let bags = bags_from(start, &[7]);
        let summary = AlertClassifier::new().classify(&bags, &pt_care(), &RnVisitFlags::none(), today());

        assert_eq!(summary.disconnect_date, Some(today() + Duration::days(1)));
        assert_eq!(summary.disconnect_alert, DisconnectAlert::DisconnectTomorrow);
        assert_eq!(summary.states(), vec![AlertState::None]);
        assert!(summary.row_needs_attention);
    }

    #[test]
    fn test_disconnect_today() {
        let engine = AlertClassifier::new();
        assert_eq!(engine.classify_disconnect(today(), today()), DisconnectAlert::DisconnectToday);
        assert_eq!(
            engine.classify_disconnect(today() + Duration::days(2), today()),
            DisconnectAlert::None
        );
    }

    #[test]
    fn test_today_at_calendar_end() {
        let engine = AlertClassifier::new();
        assert_eq!(
            engine.classify_disconnect(NaiveDate::MAX, NaiveDate::MAX),
            DisconnectAlert::DisconnectToday
        );
        assert_eq!(
            engine.classify_disconnect(NaiveDate::MIN, NaiveDate::MAX),
            DisconnectAlert::None
        );
    }

    #[test]
    fn test_empty_bags() {
        let summary = AlertClassifier::new().classify(&[], &rn_care(), &RnVisitFlags::none(), today());
        assert_eq!(summary, AlertSummary::empty());
    }
}
