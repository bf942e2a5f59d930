use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    /// Combined date and time of the visit.
    #[serde(deserialize_with = "wire::datetime")]
    pub appointment_date: NaiveDateTime,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<EntityId>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}
