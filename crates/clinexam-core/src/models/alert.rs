use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertSeverity {
    Critical,
    Urgent,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alert {
    pub id: String,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<String>,
    /// 1 is the highest priority.
    pub priority: u8,
}

/// Coarse urgency derived from the active alerts. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TriageLevel {
    Stable,
    Urgent,
    Critical,
}

impl TriageLevel {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        if alerts.iter().any(|a| a.severity == AlertSeverity::Critical) {
            TriageLevel::Critical
        } else if alerts
            .iter()
            .any(|a| matches!(a.severity, AlertSeverity::Urgent | AlertSeverity::Warning))
        {
            TriageLevel::Urgent
        } else {
            TriageLevel::Stable
        }
    }
}
