// ==========================================
// 输液袋更换排程系统 - 配置层
// ==========================================
// 职责: 策略开关管理（5 天袋 / 6 天袋）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod policy_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, GLOBAL_SCOPE};
pub use error::ConfigError;
pub use policy_config_trait::PolicyConfigReader;
