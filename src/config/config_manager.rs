// ==========================================
// 输液袋更换排程系统 - 配置管理器
// ==========================================
// 职责: 策略开关加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::error::ConfigError;
use crate::config::policy_config_trait::PolicyConfigReader;
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::domain::types::PolicyFlags;
use crate::perf::is_true;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// 全局作用域
pub const GLOBAL_SCOPE: &str = "global";

/// 配置键
pub mod config_keys {
    pub const ENABLE_5_DAY_BAGS: &str = "bag_policy/enable_5_day_bags";
    pub const ENABLE_6_DAY_BAGS: &str = "bag_policy/enable_6_day_bags";
}

/// 识别为 false 的取值
fn is_false(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "n" | "off" | ""
    )
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 打开数据库并确保 config_kv 表存在
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    ///
    /// 会对传入连接再次应用统一 PRAGMA 与建表（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入 global scope 配置（last-writer-wins）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 读取布尔配置；缺失为 false，无法识别报错
    fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get_config_value(key)? {
            None => Ok(false),
            Some(v) if is_true(&v) => Ok(true),
            Some(v) if is_false(&v) => Ok(false),
            Some(v) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: v,
            }),
        }
    }

    /// 保存策略开关
    pub fn set_policy_flags(&self, flags: PolicyFlags) -> Result<(), ConfigError> {
        self.set_global_config_value(
            config_keys::ENABLE_5_DAY_BAGS,
            if flags.enable_5_day_bags { "true" } else { "false" },
        )?;
        self.set_global_config_value(
            config_keys::ENABLE_6_DAY_BAGS,
            if flags.enable_6_day_bags { "true" } else { "false" },
        )?;
        Ok(())
    }

    /// 获取 global scope 配置快照（JSON，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

#[async_trait]
impl PolicyConfigReader for ConfigManager {
    async fn get_enable_5_day_bags(&self) -> Result<bool, ConfigError> {
        self.get_bool(config_keys::ENABLE_5_DAY_BAGS)
    }

    async fn get_enable_6_day_bags(&self) -> Result<bool, ConfigError> {
        self.get_bool(config_keys::ENABLE_6_DAY_BAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_missing_flags_default_to_false() {
        let manager = in_memory();
        let flags = manager.get_policy_flags().await.unwrap();
        assert_eq!(flags, PolicyFlags::default());
    }

    #[tokio::test]
    async fn test_set_and_read_flags() {
        let manager = in_memory();
        manager.set_policy_flags(PolicyFlags::new(true, false)).unwrap();

        let flags = manager.get_policy_flags().await.unwrap();
        assert!(flags.enable_5_day_bags);
        assert!(!flags.enable_6_day_bags);
    }

    #[tokio::test]
    async fn test_truthy_variants() {
        let manager = in_memory();
        manager
            .set_global_config_value(config_keys::ENABLE_6_DAY_BAGS, "YES")
            .unwrap();
        assert!(manager.get_enable_6_day_bags().await.unwrap());

        manager
            .set_global_config_value(config_keys::ENABLE_6_DAY_BAGS, "off")
            .unwrap();
        assert!(!manager.get_enable_6_day_bags().await.unwrap());
    }

    #[tokio::test]
    async fn test_unparseable_flag_is_error() {
        let manager = in_memory();
        manager
            .set_global_config_value(config_keys::ENABLE_5_DAY_BAGS, "maybe")
            .unwrap();

        let err = manager.get_policy_flags().await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_config_snapshot() {
        let manager = in_memory();
        manager.set_policy_flags(PolicyFlags::new(false, true)).unwrap();

        let snapshot = manager.get_config_snapshot().unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed.get(config_keys::ENABLE_5_DAY_BAGS).map(String::as_str), Some("false"));
        assert_eq!(parsed.get(config_keys::ENABLE_6_DAY_BAGS).map(String::as_str), Some("true"));
    }
}
