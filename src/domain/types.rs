// ==========================================
// 输液袋更换排程系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 袋级提醒状态 (Alert State)
// ==========================================
// 红线: 抽吸提醒 > RN 上门 > 常规换袋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertState {
    None,               // 无提醒
    TodayRoutine,       // 今日常规换袋
    TomorrowRoutine,    // 明日常规换袋
    AspirationTomorrow, // 明日需抽吸（紧急着色）
    AspirationToday,    // 今日需抽吸
    RnVisitToday,       // 今日需 RN 上门
    RnVisitTomorrow,    // 明日需 RN 上门
}

impl AlertState {
    /// 是否为需要关注的状态
    pub fn is_active(&self) -> bool {
        !matches!(self, AlertState::None)
    }

    /// 是否为抽吸类提醒
    pub fn is_aspiration(&self) -> bool {
        matches!(self, AlertState::AspirationToday | AlertState::AspirationTomorrow)
    }

    /// 国际化键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AlertState::None => "alert.none",
            AlertState::TodayRoutine => "alert.today_routine",
            AlertState::TomorrowRoutine => "alert.tomorrow_routine",
            AlertState::AspirationTomorrow => "alert.aspiration_tomorrow",
            AlertState::AspirationToday => "alert.aspiration_today",
            AlertState::RnVisitToday => "alert.rn_visit_today",
            AlertState::RnVisitTomorrow => "alert.rn_visit_tomorrow",
        }
    }

    /// 本地化显示文本
    pub fn label(&self) -> String {
        crate::i18n::t(self.i18n_key())
    }
}

impl Default for AlertState {
    fn default() -> Self {
        AlertState::None
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertState::None => write!(f, "NONE"),
            AlertState::TodayRoutine => write!(f, "TODAY_ROUTINE"),
            AlertState::TomorrowRoutine => write!(f, "TOMORROW_ROUTINE"),
            AlertState::AspirationTomorrow => write!(f, "ASPIRATION_TOMORROW"),
            AlertState::AspirationToday => write!(f, "ASPIRATION_TODAY"),
            AlertState::RnVisitToday => write!(f, "RN_VISIT_TODAY"),
            AlertState::RnVisitTomorrow => write!(f, "RN_VISIT_TOMORROW"),
        }
    }
}

// ==========================================
// 拔管提醒 (Disconnect Alert)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisconnectAlert {
    None,
    DisconnectToday,
    DisconnectTomorrow,
}

impl DisconnectAlert {
    pub fn is_active(&self) -> bool {
        !matches!(self, DisconnectAlert::None)
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            DisconnectAlert::None => "alert.none",
            DisconnectAlert::DisconnectToday => "alert.disconnect_today",
            DisconnectAlert::DisconnectTomorrow => "alert.disconnect_tomorrow",
        }
    }

    pub fn label(&self) -> String {
        crate::i18n::t(self.i18n_key())
    }
}

impl Default for DisconnectAlert {
    fn default() -> Self {
        DisconnectAlert::None
    }
}

impl fmt::Display for DisconnectAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectAlert::None => write!(f, "NONE"),
            DisconnectAlert::DisconnectToday => write!(f, "DISCONNECT_TODAY"),
            DisconnectAlert::DisconnectTomorrow => write!(f, "DISCONNECT_TOMORROW"),
        }
    }
}

// ==========================================
// 排程状态 (Schedule Status)
// ==========================================
// NotConfigured: 周期日期缺失/无法解析，不运行排程
// Completed:     剩余天数 ≤ 0，空排程（合法结果）
// Active:        已生成袋序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    NotConfigured,
    Completed,
    Active,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::NotConfigured => write!(f, "NOT_CONFIGURED"),
            ScheduleStatus::Completed => write!(f, "COMPLETED"),
            ScheduleStatus::Active => write!(f, "ACTIVE"),
        }
    }
}

// ==========================================
// 策略开关 (Policy Flags)
// ==========================================
// 进程级，会话内加载一次，所有患者只读共享
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFlags {
    pub enable_5_day_bags: bool,
    pub enable_6_day_bags: bool,
}

impl PolicyFlags {
    pub fn new(enable_5_day_bags: bool, enable_6_day_bags: bool) -> Self {
        Self {
            enable_5_day_bags,
            enable_6_day_bags,
        }
    }
}
