// ==========================================
// 输液袋更换排程系统 - 输液袋实体
// ==========================================
// 红线: Bag 是派生数据，每次重算整体替换，不原地修改
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 无表项时的显示文本
pub const TBD: &str = "TBD";

/// 袋的容量/流速（临床常量表）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfusionParams {
    pub volume_ml: u32,
    pub rate_ml_per_hr: f64,
}

/// 单个输液袋
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    /// 袋序号（0 起）
    pub index: usize,
    /// 持续天数
    pub duration_days: i32,
    /// 开始日期（换袋日）
    pub start_date: NaiveDate,
    /// 结束日期 = 开始日期 + 持续天数
    pub end_date: NaiveDate,
    /// 容量/流速；None 表示 TBD
    pub infusion: Option<InfusionParams>,
}

impl Bag {
    pub fn volume_ml(&self) -> Option<u32> {
        self.infusion.map(|p| p.volume_ml)
    }

    pub fn rate_ml_per_hr(&self) -> Option<f64> {
        self.infusion.map(|p| p.rate_ml_per_hr)
    }

    /// 容量显示文本，例如 `240 ml` 或 `TBD`
    pub fn volume_label(&self) -> String {
        match self.infusion {
            Some(p) => format!("{} ml", p.volume_ml),
            None => TBD.to_string(),
        }
    }

    /// 流速显示文本，例如 `1.8 ml/hr` 或 `TBD`
    pub fn rate_label(&self) -> String {
        match self.infusion {
            Some(p) => format!("{} ml/hr", p.rate_ml_per_hr),
            None => TBD.to_string(),
        }
    }
}
