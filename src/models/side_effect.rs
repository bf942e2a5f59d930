use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::SideEffectSeverity;
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub medication_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    pub effect_name: String,
    pub severity: SideEffectSeverity,
    #[serde(default, deserialize_with = "wire::opt_datetime")]
    pub occurred_at: Option<NaiveDateTime>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub action_taken: Option<String>,
    #[serde(default)]
    pub resolved: bool,
}

impl Default for SideEffect {
    fn default() -> Self {
        Self {
            id: None,
            patient_id: None,
            patient_name: None,
            medication_id: None,
            medication_name: None,
            effect_name: String::new(),
            severity: SideEffectSeverity::Mild,
            occurred_at: None,
            duration: None,
            description: None,
            action_taken: None,
            resolved: false,
        }
    }
}
