// ==========================================
// 输液袋更换排程系统 - 性能统计
// ==========================================
// 开关:
// - Debug 默认开启；Release 默认关闭
// - `INFUSION_SCHEDULER_PERF=1` 强制开启
// ==========================================

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

// 0 = 未初始化, 1 = 关闭, 2 = 开启
static PERF_ENABLED: AtomicU8 = AtomicU8::new(0);

pub(crate) fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn perf_enabled() -> bool {
    match PERF_ENABLED.load(Ordering::Relaxed) {
        1 => false,
        2 => true,
        _ => {
            let enabled = match std::env::var("INFUSION_SCHEDULER_PERF") {
                Ok(v) => is_true(&v),
                Err(_) => cfg!(debug_assertions),
            };
            PERF_ENABLED.store(if enabled { 2 } else { 1 }, Ordering::Relaxed);
            enabled
        }
    }
}

/// 性能统计 Guard：drop 时记录 elapsed_us
///
/// 使用方式：
/// ```ignore
/// let _perf = infusion_bag_scheduler::perf::PerfGuard::new("compute_schedule");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    enabled: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            enabled: perf_enabled(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }

        let elapsed_us = self.start.elapsed().as_micros() as u64;
        tracing::info!(target: "perf", op = self.op, elapsed_us, "done");
    }
}
