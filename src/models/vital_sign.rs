use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{wire, EntityId};

/// One vital-signs reading. Every measurement is optional; the form only
/// requires the patient and the timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_datetime")]
    pub recorded_at: Option<NaiveDateTime>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub notes: Option<String>,
}

impl VitalSigns {
    /// Blood pressure as `"120/80"`, or `None` unless both halves are set.
    pub fn blood_pressure(&self) -> Option<String> {
        match (self.systolic_bp, self.diastolic_bp) {
            (Some(s), Some(d)) => Some(format!("{s:.0}/{d:.0}")),
            _ => None,
        }
    }
}
