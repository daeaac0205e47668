// ==========================================
// 输液袋更换排程系统 - 引擎层
// ==========================================
// 职责: 切分 → 生成 → 提醒 → 日历，纯计算
// 红线: Engine 不做 IO, 所有提醒必须输出 reason
// ==========================================

pub mod alert;
pub mod calendar;
pub mod materializer;
pub mod orchestrator;
pub mod partitioner;

// 重导出核心引擎
pub use alert::{AlertClassifier, AlertSummary, BagAlert};
pub use calendar::CalendarProjector;
pub use materializer::{infusion_params_for, BagMaterializer};
pub use orchestrator::{ScheduleOrchestrator, ScheduleResult};
pub use partitioner::DurationPartitioner;
