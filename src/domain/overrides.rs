// ==========================================
// 输液袋更换排程系统 - 临床覆写与 RN 上门标记
// ==========================================
// 说明: 由调用方持有并按值传入，每次计算都是快照
// ==========================================

use crate::domain::cycle::MAX_CYCLE_DAYS;
use crate::domain::error::ScheduleInputError;
use serde::{Deserialize, Serialize};

/// 覆写值允许的取值范围
pub const MIN_BAG_DAYS: i32 = 1;
pub const MAX_BAG_DAYS: i32 = 7;

// ==========================================
// OverrideSet - 按袋位置的时长覆写
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSet {
    slots: Vec<Option<i32>>,
}

impl Default for OverrideSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl OverrideSet {
    /// 空覆写集（28 个位置全部缺省）
    pub fn empty() -> Self {
        Self {
            slots: vec![None; MAX_CYCLE_DAYS],
        }
    }

    /// 从原始数组构建
    ///
    /// 宽松处理：超过 28 的位置截断，1..=7 以外的值丢弃
    pub fn from_raw(raw: &[Option<i32>]) -> Self {
        let mut set = Self::empty();
        for (index, value) in raw.iter().enumerate().take(MAX_CYCLE_DAYS) {
            if let Some(v) = value {
                if (MIN_BAG_DAYS..=MAX_BAG_DAYS).contains(v) {
                    set.slots[index] = Some(*v);
                } else {
                    tracing::debug!(index, value = v, "丢弃越界覆写值");
                }
            }
        }
        set
    }

    /// 严格设置单个覆写
    pub fn try_set(&mut self, index: usize, value: i32) -> Result<(), ScheduleInputError> {
        if index >= MAX_CYCLE_DAYS {
            return Err(ScheduleInputError::OverrideIndexOutOfRange {
                index,
                max: MAX_CYCLE_DAYS,
            });
        }
        if !(MIN_BAG_DAYS..=MAX_BAG_DAYS).contains(&value) {
            return Err(ScheduleInputError::OverrideValueOutOfRange { index, value });
        }
        self.slots[index] = Some(value);
        Ok(())
    }

    /// 清除单个覆写
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// 读取某位置的覆写
    pub fn get(&self, index: usize) -> Option<i32> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn as_slice(&self) -> &[Option<i32>] {
        &self.slots
    }
}

// ==========================================
// RnVisitFlags - 按袋位置的 RN 上门标记
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RnVisitFlags {
    flags: Vec<bool>,
}

impl Default for RnVisitFlags {
    fn default() -> Self {
        Self::none()
    }
}

impl RnVisitFlags {
    pub fn none() -> Self {
        Self {
            flags: vec![false; MAX_CYCLE_DAYS],
        }
    }

    /// 从原始数组构建（超过 28 的位置截断）
    pub fn from_raw(raw: &[bool]) -> Self {
        let mut set = Self::none();
        for (index, flag) in raw.iter().enumerate().take(MAX_CYCLE_DAYS) {
            set.flags[index] = *flag;
        }
        set
    }

    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(slot) = self.flags.get_mut(index) {
            *slot = value;
        }
    }

    /// 越界位置视为未标记
    pub fn get(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }
}
