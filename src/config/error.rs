// ==========================================
// 输液袋更换排程系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    LockError(String),

    #[error("配置值无法解析 (key={key}): {value}")]
    InvalidValue { key: String, value: String },

    #[error("配置序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}
