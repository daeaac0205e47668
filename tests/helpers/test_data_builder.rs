// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use infusion_bag_scheduler::domain::PatientScheduleInput;

/// 基准日期: 2026-03-03
pub fn base_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// PatientScheduleInput 构建器
// ==========================================

pub struct PatientInputBuilder {
    input: PatientScheduleInput,
}

impl PatientInputBuilder {
    /// 默认: 28 天周期，03-01 开始，03-03 居家开始，RN 换袋
    pub fn new(patient_id: &str) -> Self {
        Self {
            input: PatientScheduleInput {
                patient_id: patient_id.to_string(),
                total_cycle_days: Some(28),
                cycle_start_date: Some("2026-03-01".to_string()),
                schedule_start_date: Some("2026-03-03".to_string()),
                is_preservative_free: false,
                bag_change_by: Some("RN".to_string()),
                overrides: Vec::new(),
                rn_visits: Vec::new(),
            },
        }
    }

    pub fn cycle_days(mut self, days: i32) -> Self {
        self.input.total_cycle_days = Some(days);
        self
    }

    pub fn cycle_start(mut self, raw: &str) -> Self {
        self.input.cycle_start_date = Some(raw.to_string());
        self
    }

    pub fn schedule_start(mut self, raw: &str) -> Self {
        self.input.schedule_start_date = Some(raw.to_string());
        self
    }

    pub fn preservative_free(mut self) -> Self {
        self.input.is_preservative_free = true;
        self
    }

    pub fn bag_change_by(mut self, who: &str) -> Self {
        self.input.bag_change_by = Some(who.to_string());
        self
    }

    /// 设置某位置覆写（自动补齐前面的空位）
    pub fn override_at(mut self, index: usize, value: i32) -> Self {
        if self.input.overrides.len() <= index {
            self.input.overrides.resize(index + 1, None);
        }
        self.input.overrides[index] = Some(value);
        self
    }

    /// 设置某位置 RN 上门标记（自动补齐前面的空位）
    pub fn rn_visit_at(mut self, index: usize) -> Self {
        if self.input.rn_visits.len() <= index {
            self.input.rn_visits.resize(index + 1, false);
        }
        self.input.rn_visits[index] = true;
        self
    }

    pub fn build(self) -> PatientScheduleInput {
        self.input
    }
}
