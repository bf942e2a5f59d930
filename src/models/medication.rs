use serde::{Deserialize, Serialize};

use super::enums::MedicationCategory;
use super::EntityId;

/// Formulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
    pub strength: Option<String>,
    pub dosage_form: Option<String>,
    pub category: MedicationCategory,
    pub description: Option<String>,
    pub side_effects: Option<String>,
    pub contraindications: Option<String>,
    pub interactions: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Medication {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            generic_name: None,
            manufacturer: None,
            strength: None,
            dosage_form: None,
            category: MedicationCategory::Arv,
            description: None,
            side_effects: None,
            contraindications: None,
            interactions: None,
            is_active: true,
        }
    }
}
