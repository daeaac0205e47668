// ==========================================
// 输液袋更换排程系统 - 核心库
// ==========================================
// 系统定位: 纯计算的排程投影 + 只读提醒判定
// 技术栈: Rust + SQLite（仅策略配置）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排程规则
pub mod engine;

// 配置层 - 策略开关
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 打印导出
pub mod export;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AlertState, Bag, CalendarCell, CalendarEvent, CareFlags, CycleSpec, DisconnectAlert,
    MonthGrid, MonthRange, OverrideSet, PatientScheduleInput, PolicyFlags, RnVisitFlags,
    ScheduleInputError, ScheduleStatus,
};

// 引擎
pub use engine::{
    AlertClassifier, AlertSummary, BagAlert, BagMaterializer, CalendarProjector,
    DurationPartitioner, ScheduleOrchestrator, ScheduleResult,
};

// 配置
pub use config::{ConfigError, ConfigManager, PolicyConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "输液袋更换排程系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
