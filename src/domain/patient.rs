// ==========================================
// 输液袋更换排程系统 - 患者排程快照
// ==========================================
// 职责: 患者记录中与排程相关字段的只读快照
// 红线: 不含持久化逻辑，由外部系统读写患者记录
// ==========================================

use crate::domain::cycle::{parse_date, CycleSpec};
use crate::domain::error::ScheduleInputError;
use crate::domain::overrides::{OverrideSet, RnVisitFlags};
use serde::{Deserialize, Serialize};

// ==========================================
// CareFlags - 换袋责任方
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareFlags {
    /// 换袋责任方原始字段，例如 "RN"、"Pt/Caregiver"
    pub bag_change_by: String,
}

impl CareFlags {
    pub fn new(bag_change_by: impl Into<String>) -> Self {
        Self {
            bag_change_by: bag_change_by.into(),
        }
    }

    /// 是否由患者/家属换袋（不区分大小写包含 "pt"）
    pub fn is_caregiver_managed(&self) -> bool {
        self.bag_change_by.to_lowercase().contains("pt")
    }
}

// ==========================================
// PatientScheduleInput - 原始快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientScheduleInput {
    pub patient_id: String,

    /// 周期总天数
    #[serde(default)]
    pub total_cycle_days: Option<i32>,

    /// 医院给药开始日期（原始字符串）
    #[serde(default)]
    pub cycle_start_date: Option<String>,

    /// 居家方案开始日期（原始字符串）
    #[serde(default)]
    pub schedule_start_date: Option<String>,

    #[serde(default)]
    pub is_preservative_free: bool,

    #[serde(default)]
    pub bag_change_by: Option<String>,

    /// 按袋位置的时长覆写
    #[serde(default)]
    pub overrides: Vec<Option<i32>>,

    /// 按袋位置的 RN 上门标记
    #[serde(default)]
    pub rn_visits: Vec<bool>,
}

impl PatientScheduleInput {
    /// 解析周期定义
    pub fn cycle_spec(&self) -> Result<CycleSpec, ScheduleInputError> {
        let total = self
            .total_cycle_days
            .ok_or(ScheduleInputError::MissingField("total_cycle_days"))?;

        let cycle_start = parse_date(
            "cycle_start_date",
            self.cycle_start_date
                .as_deref()
                .ok_or(ScheduleInputError::MissingField("cycle_start_date"))?,
        )?;

        let schedule_start = parse_date(
            "schedule_start_date",
            self.schedule_start_date
                .as_deref()
                .ok_or(ScheduleInputError::MissingField("schedule_start_date"))?,
        )?;

        CycleSpec::new(total, cycle_start, schedule_start, self.is_preservative_free)
    }

    pub fn override_set(&self) -> OverrideSet {
        OverrideSet::from_raw(&self.overrides)
    }

    pub fn rn_visit_flags(&self) -> RnVisitFlags {
        RnVisitFlags::from_raw(&self.rn_visits)
    }

    pub fn care_flags(&self) -> CareFlags {
        CareFlags::new(self.bag_change_by.clone().unwrap_or_default())
    }
}
