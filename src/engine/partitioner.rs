// ==========================================
// 输液袋更换排程系统 - 袋时长切分引擎
// ==========================================
// 红线: 时长之和 == 剩余天数; 最多 28 袋; 无防腐剂每袋 1 天
// ==========================================
// 职责: 剩余天数 + 覆写 + 策略开关 → 有序袋时长列表
// 输入: remaining_days, OverrideSet, is_preservative_free, PolicyFlags
// 输出: Vec<i32>，每项 ∈ {1..=7}
// ==========================================

use crate::domain::cycle::MAX_CYCLE_DAYS;
use crate::domain::overrides::OverrideSet;
use crate::domain::types::PolicyFlags;
use tracing::instrument;

/// 基础允许时长（不依赖开关）
const BASE_DURATIONS: [i32; 5] = [1, 2, 3, 4, 7];

// ==========================================
// DurationPartitioner - 袋时长切分引擎
// ==========================================
pub struct DurationPartitioner {
    // 无状态引擎，策略开关由调用方按值传入
}

impl Default for DurationPartitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationPartitioner {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 切分剩余天数
    ///
    /// 规则（逐袋执行）:
    /// 1) 当前位置有覆写 且 覆写 ∈ 允许集 且 覆写 ≤ 剩余天数 → 使用覆写
    /// 2) 无防腐剂 → 1
    /// 3) 贪心余数规则（见 `greedy_duration`）
    ///
    /// 前置条件: remaining_days > 0，否则返回空列表
    #[instrument(skip(self, overrides))]
    pub fn partition(
        &self,
        remaining_days: i32,
        overrides: &OverrideSet,
        is_preservative_free: bool,
        flags: PolicyFlags,
    ) -> Vec<i32> {
        let mut durations = Vec::new();
        if remaining_days <= 0 {
            return durations;
        }

        let allowed = Self::allowed_durations(is_preservative_free, flags);
        let mut remaining = remaining_days;

        while remaining > 0 {
            let index = durations.len();
            if index >= MAX_CYCLE_DAYS {
                tracing::warn!(
                    remaining_days,
                    unallocated = remaining,
                    "袋数量达到上限，剩余天数未分配"
                );
                break;
            }

            let duration = match overrides.get(index) {
                Some(v) if allowed.contains(&v) && v <= remaining => v,
                other => {
                    if let Some(v) = other {
                        tracing::debug!(index, value = v, remaining, "覆写不适用，按规则计算");
                    }
                    if is_preservative_free {
                        1
                    } else {
                        Self::greedy_duration(remaining)
                    }
                }
            };

            durations.push(duration);
            remaining -= duration;
        }

        tracing::debug!(bag_count = durations.len(), ?durations, "切分完成");
        durations
    }

    // ==========================================
    // 规则表
    // ==========================================

    /// 当前患者允许的时长集合
    ///
    /// - 无防腐剂 → {1}
    /// - 否则 {1,2,3,4,7}，开关开启时追加 5 / 6
    pub fn allowed_durations(is_preservative_free: bool, flags: PolicyFlags) -> Vec<i32> {
        if is_preservative_free {
            return vec![1];
        }

        let mut allowed = BASE_DURATIONS.to_vec();
        if flags.enable_5_day_bags {
            allowed.push(5);
        }
        if flags.enable_6_day_bags {
            allowed.push(6);
        }
        allowed.sort_unstable();
        allowed
    }

    /// 贪心余数规则（固定策略表，不做推导）
    ///
    /// - remaining ≤ 4 → remaining
    /// - remaining == 5 → 2（拆为 2+3）
    /// - remaining == 6 → 3（拆为 3+3）
    /// - remaining % 7 == 0 → 7
    /// - 否则取 remaining % 7，再映射: ≤4 原值; 5 → 2; 6 → 3
    pub fn greedy_duration(remaining: i32) -> i32 {
        match remaining {
            r if r <= 4 => r,
            5 => 2,
            6 => 3,
            r if r % 7 == 0 => 7,
            r => Self::split_remainder(r % 7),
        }
    }

    fn split_remainder(r: i32) -> i32 {
        match r {
            5 => 2,
            6 => 3,
            r => r,
        }
    }
}
