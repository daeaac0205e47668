// ==========================================
// 输液袋更换排程系统 - 策略配置读取 Trait
// ==========================================
// 职责: 定义排程引擎所需的策略读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::types::PolicyFlags;
use async_trait::async_trait;

// ==========================================
// PolicyConfigReader Trait
// ==========================================
// 用途: 会话开始时加载一次策略开关
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait PolicyConfigReader: Send + Sync {
    /// 是否启用 5 天袋
    ///
    /// # 默认值
    /// - false
    async fn get_enable_5_day_bags(&self) -> Result<bool, ConfigError>;

    /// 是否启用 6 天袋
    ///
    /// # 默认值
    /// - false
    async fn get_enable_6_day_bags(&self) -> Result<bool, ConfigError>;

    /// 读取全部策略开关
    async fn get_policy_flags(&self) -> Result<PolicyFlags, ConfigError> {
        Ok(PolicyFlags {
            enable_5_day_bags: self.get_enable_5_day_bags().await?,
            enable_6_day_bags: self.get_enable_6_day_bags().await?,
        })
    }
}
