// ==========================================
// Mock 策略配置 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use infusion_bag_scheduler::config::{ConfigError, PolicyConfigReader};

/// Mock 配置结构
#[derive(Debug, Clone, Default)]
pub struct MockPolicyConfig {
    pub enable_5_day_bags: bool,
    pub enable_6_day_bags: bool,
}

impl MockPolicyConfig {
    /// 5 天袋 / 6 天袋全部开启
    pub fn all_enabled() -> Self {
        Self {
            enable_5_day_bags: true,
            enable_6_day_bags: true,
        }
    }

    pub fn with_flags(enable_5: bool, enable_6: bool) -> Self {
        Self {
            enable_5_day_bags: enable_5,
            enable_6_day_bags: enable_6,
        }
    }
}

#[async_trait]
impl PolicyConfigReader for MockPolicyConfig {
    async fn get_enable_5_day_bags(&self) -> Result<bool, ConfigError> {
        Ok(self.enable_5_day_bags)
    }

    async fn get_enable_6_day_bags(&self) -> Result<bool, ConfigError> {
        Ok(self.enable_6_day_bags)
    }
}
