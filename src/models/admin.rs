use serde::{Deserialize, Serialize};

/// `GET /admin/system-stats`. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStats {
    pub total_users: u64,
    pub total_patients: u64,
    pub total_doctors: u64,
    pub today_appointments: u64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub recent_logs: Vec<LogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// `GET /admin/user-stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub active_users: u64,
}

/// `GET /dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_patients: u64,
    pub total_appointments: u64,
    pub total_prescriptions: u64,
    pub total_lab_results: u64,
    pub today_appointments: u64,
    pub new_prescriptions: u64,
}

/// Administrative system commands. Fire-and-forget: success is only the
/// HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemAction {
    Backup,
    ToggleMaintenance,
    ClearCache,
    Restart,
}

impl SystemAction {
    pub const ALL: &'static [SystemAction] = &[
        SystemAction::Backup,
        SystemAction::ToggleMaintenance,
        SystemAction::ClearCache,
        SystemAction::Restart,
    ];

    /// Path below `/admin/system`.
    pub fn path(self) -> &'static str {
        match self {
            SystemAction::Backup => "backup",
            SystemAction::ToggleMaintenance => "maintenance",
            SystemAction::ClearCache => "cache/clear",
            SystemAction::Restart => "restart",
        }
    }

    pub fn needs_confirmation(self) -> bool {
        matches!(self, SystemAction::Restart)
    }
}
