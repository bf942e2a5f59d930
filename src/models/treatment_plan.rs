use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{PlanItemType, TreatmentPlanStatus};
use super::{wire, EntityId};

/// One ordered step of a treatment plan. Medication fields are only
/// meaningful when `item_type` is `MEDICATION`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlanItem {
    pub item_type: PlanItemType,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Default for TreatmentPlanItem {
    fn default() -> Self {
        Self {
            item_type: PlanItemType::Medication,
            title: String::new(),
            description: None,
            medication_id: None,
            dosage: None,
            frequency: None,
            due_date: None,
            is_completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<EntityId>,
    pub plan_name: String,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub end_date: Option<NaiveDate>,
    pub status: TreatmentPlanStatus,
    pub goals: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<TreatmentPlanItem>,
}

impl TreatmentPlan {
    /// Completed items over total, as a whole percentage.
    pub fn progress(&self) -> u32 {
        if self.items.is_empty() {
            return 0;
        }
        let done = self.items.iter().filter(|i| i.is_completed).count();
        ((done as f64 / self.items.len() as f64) * 100.0).round() as u32
    }
}

impl Default for TreatmentPlan {
    fn default() -> Self {
        Self {
            id: None,
            patient_id: None,
            patient_name: None,
            doctor_id: None,
            plan_name: String::new(),
            start_date: None,
            end_date: None,
            status: TreatmentPlanStatus::Active,
            goals: None,
            notes: None,
            items: Vec::new(),
        }
    }
}
