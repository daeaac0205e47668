// ==========================================
// 输液袋更换排程系统 - 排程编排器
// ==========================================
// 职责: 协调 切分 → 生成 → 提醒 → 日历 四个引擎
// 红线: 纯计算，每次输入变化整体重算，不缓存不落库
// ==========================================

use crate::config::{ConfigError, PolicyConfigReader};
use crate::domain::bag::Bag;
use crate::domain::calendar::{MonthGrid, MonthRange};
use crate::domain::cycle::CycleSpec;
use crate::domain::overrides::{OverrideSet, RnVisitFlags};
use crate::domain::patient::{CareFlags, PatientScheduleInput};
use crate::domain::types::{PolicyFlags, ScheduleStatus};
use crate::engine::alert::{AlertClassifier, AlertSummary};
use crate::engine::calendar::CalendarProjector;
use crate::engine::materializer::BagMaterializer;
use crate::engine::partitioner::DurationPartitioner;
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 排程结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub patient_id: String,
    pub status: ScheduleStatus,
    /// 未配置时为 None
    pub cycle: Option<CycleSpec>,
    /// 未配置原因（仅 NotConfigured）
    pub not_configured_reason: Option<String>,
    pub bags: Vec<Bag>,
    pub alerts: AlertSummary,
    pub calendar: Vec<MonthGrid>,
}

impl ScheduleResult {
    fn without_bags(
        patient_id: &str,
        status: ScheduleStatus,
        cycle: Option<CycleSpec>,
        reason: Option<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            status,
            cycle,
            not_configured_reason: reason,
            bags: Vec::new(),
            alerts: AlertSummary::empty(),
            calendar: Vec::new(),
        }
    }

    pub fn durations(&self) -> Vec<i32> {
        self.bags.iter().map(|b| b.duration_days).collect()
    }

    pub fn row_needs_attention(&self) -> bool {
        self.alerts.row_needs_attention
    }
}

// ==========================================
// ScheduleOrchestrator - 排程编排器
// ==========================================
pub struct ScheduleOrchestrator {
    policy: PolicyFlags,
    partitioner: DurationPartitioner,
    materializer: BagMaterializer,
    classifier: AlertClassifier,
    projector: CalendarProjector,
}

impl ScheduleOrchestrator {
    pub fn new(policy: PolicyFlags) -> Self {
        Self {
            policy,
            partitioner: DurationPartitioner::new(),
            materializer: BagMaterializer::new(),
            classifier: AlertClassifier::new(),
            projector: CalendarProjector::new(),
        }
    }

    /// 从配置读取策略开关（会话内加载一次）
    pub async fn from_config(reader: &dyn PolicyConfigReader) -> Result<Self, ConfigError> {
        let policy = reader.get_policy_flags().await?;
        tracing::info!(
            enable_5_day_bags = policy.enable_5_day_bags,
            enable_6_day_bags = policy.enable_6_day_bags,
            "策略开关已加载"
        );
        Ok(Self::new(policy))
    }

    pub fn policy(&self) -> PolicyFlags {
        self.policy
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 从患者快照计算排程
    ///
    /// - 日期缺失/无法解析 → NotConfigured（不报错）
    /// - 剩余天数 ≤ 0 → Completed（空排程）
    /// - 否则 → Active
    #[instrument(skip(self, input), fields(patient_id = %input.patient_id))]
    pub fn compute(&self, input: &PatientScheduleInput, today: NaiveDate) -> ScheduleResult {
        let _perf = PerfGuard::new("compute_schedule");

        let cycle = match input.cycle_spec() {
            Ok(c) => c,
            Err(e) => {
                tracing::info!(error = %e, "排程未配置");
                return ScheduleResult::without_bags(
                    &input.patient_id,
                    ScheduleStatus::NotConfigured,
                    None,
                    Some(e.to_string()),
                );
            }
        };

        self.compute_for_cycle(
            &input.patient_id,
            &cycle,
            &input.override_set(),
            &input.care_flags(),
            &input.rn_visit_flags(),
            today,
        )
    }

    /// 从已解析的周期计算排程
    pub fn compute_for_cycle(
        &self,
        patient_id: &str,
        cycle: &CycleSpec,
        overrides: &OverrideSet,
        care: &CareFlags,
        rn_visits: &RnVisitFlags,
        today: NaiveDate,
    ) -> ScheduleResult {
        let remaining_days = cycle.remaining_days();
        if remaining_days <= 0 {
            tracing::debug!(remaining_days, "周期已结束，无需排程");
            return ScheduleResult::without_bags(
                patient_id,
                ScheduleStatus::Completed,
                Some(*cycle),
                None,
            );
        }

        // 1. 切分
        let durations = self.partitioner.partition(
            remaining_days,
            overrides,
            cycle.is_preservative_free,
            self.policy,
        );

        // 2. 生成
        let bags = self
            .materializer
            .materialize(cycle.schedule_start_date, &durations);

        // 3. 提醒
        let alerts = self.classifier.classify(&bags, care, rn_visits, today);

        // 4. 日历
        let calendar = self
            .projector
            .project(&bags, &alerts.per_bag, alerts.disconnect_date, None);

        tracing::info!(
            bag_count = bags.len(),
            row_needs_attention = alerts.row_needs_attention,
            "排程计算完成"
        );

        ScheduleResult {
            patient_id: patient_id.to_string(),
            status: ScheduleStatus::Active,
            cycle: Some(*cycle),
            not_configured_reason: None,
            bags,
            alerts,
            calendar,
        }
    }

    /// 按指定月份范围重新投影（打印指定月份）
    pub fn project_calendar(&self, result: &ScheduleResult, range: MonthRange) -> Vec<MonthGrid> {
        self.projector.project(
            &result.bags,
            &result.alerts.per_bag,
            result.alerts.disconnect_date,
            Some(range),
        )
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::AlertState;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
    }

    fn base_input() -> PatientScheduleInput {
        PatientScheduleInput {
            patient_id: "P-100".to_string(),
            total_cycle_days: Some(28),
            cycle_start_date: Some("2026-03-01".to_string()),
            schedule_start_date: Some("2026-03-03".to_string()),
            is_preservative_free: false,
            bag_change_by: Some("RN".to_string()),
            overrides: vec![],
            rn_visits: vec![],
        }
    }

    #[test]
    fn test_active_schedule() {
        let engine = ScheduleOrchestrator::new(PolicyFlags::default());
        let result = engine.compute(&base_input(), today());

        assert_eq!(result.status, ScheduleStatus::Active);
        assert_eq!(result.durations(), vec![2, 3, 7, 7, 7]);
        assert_eq!(result.alerts.per_bag[0].state, AlertState::TodayRoutine);
        assert!(result.row_needs_attention());
        assert_eq!(result.calendar.len(), 1);
    }

    #[test]
    fn test_unparseable_dates_not_configured() {
        let mut input = base_input();
        input.cycle_start_date = Some("not a date".to_string());

        let result = ScheduleOrchestrator::new(PolicyFlags::default()).compute(&input, today());
        assert_eq!(result.status, ScheduleStatus::NotConfigured);
        assert!(result.bags.is_empty());
        assert!(result.calendar.is_empty());
        assert!(!result.row_needs_attention());
        assert!(result.not_configured_reason.is_some());
    }

    #[test]
    fn test_finished_cycle_is_completed() {
        let mut input = base_input();
        input.total_cycle_days = Some(2);

        let result = ScheduleOrchestrator::new(PolicyFlags::default()).compute(&input, today());
        assert_eq!(result.status, ScheduleStatus::Completed);
        assert!(result.bags.is_empty());
        assert!(result.cycle.is_some());
    }

    #[test]
    fn test_policy_flags_flow_into_partition() {
        let mut input = base_input();
        input.overrides = vec![Some(5)];

        let disabled = ScheduleOrchestrator::new(PolicyFlags::default()).compute(&input, today());
        assert_eq!(disabled.durations()[0], 2);

        let enabled = ScheduleOrchestrator::new(PolicyFlags::new(true, false)).compute(&input, today());
        assert_eq!(enabled.durations()[0], 5);
        assert!(enabled.bags[0].infusion.is_none());
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let engine = ScheduleOrchestrator::new(PolicyFlags::new(true, true));
        let a = engine.compute(&base_input(), today());
        let b = engine.compute(&base_input(), today());
        assert_eq!(a, b);
    }
}
