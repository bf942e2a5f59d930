use serde::{Deserialize, Serialize};

use super::enums::{TargetGroup, TreatmentLine};
use super::EntityId;

/// Medication embedded in a regimen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimenMedication {
    pub medication_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub instructions: String,
}

/// ARV regimen.
///
/// The backend has been seen persisting two classifications: by target
/// population (`targetGroup`) and by treatment line (`line`). Both are kept
/// as independent optional fields and round-tripped untouched; neither is
/// derived from the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArvRegimen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_group: Option<TargetGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<TreatmentLine>,
    #[serde(default)]
    pub medications: Vec<RegimenMedication>,
    pub side_effects: Option<String>,
    pub contraindications: Option<String>,
    pub monitoring_requirements: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ArvRegimen {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            target_group: None,
            line: None,
            medications: Vec::new(),
            side_effects: None,
            contraindications: None,
            monitoring_requirements: None,
            notes: None,
            is_active: true,
        }
    }
}
