// ==========================================
// 输液袋更换排程系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、输入快照
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod bag;
pub mod calendar;
pub mod cycle;
pub mod error;
pub mod overrides;
pub mod patient;
pub mod types;

// 重导出核心类型
pub use bag::{Bag, InfusionParams, TBD};
pub use calendar::{
    BagStartEvent, CalendarCell, CalendarEvent, CalendarWeek, MonthGrid, MonthRange,
    MonthRangeRaw, DAYS_PER_WEEK, MAX_MONTH_SPAN,
};
pub use cycle::{parse_date, CycleSpec, MAX_CYCLE_DAYS};
pub use error::ScheduleInputError;
pub use overrides::{OverrideSet, RnVisitFlags, MAX_BAG_DAYS, MIN_BAG_DAYS};
pub use patient::{CareFlags, PatientScheduleInput};
pub use types::{AlertState, DisconnectAlert, PolicyFlags, ScheduleStatus};
