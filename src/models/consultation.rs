use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{ConsultationPriority, ConsultationStatus, ConsultationType};
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    /// Unset until a doctor is assigned.
    #[serde(default)]
    pub doctor_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(alias = "title")]
    pub subject: String,
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub consultation_type: ConsultationType,
    pub priority: ConsultationPriority,
    pub status: ConsultationStatus,
    #[serde(default, skip_serializing, deserialize_with = "wire::opt_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

impl Default for Consultation {
    fn default() -> Self {
        Self {
            id: None,
            patient_id: None,
            patient_name: None,
            doctor_id: None,
            doctor_name: None,
            subject: String::new(),
            description: None,
            consultation_type: ConsultationType::General,
            priority: ConsultationPriority::Normal,
            status: ConsultationStatus::Pending,
            created_at: None,
        }
    }
}

/// A chat line inside a consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<EntityId>,
    pub sender_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing, deserialize_with = "wire::opt_datetime")]
    pub sent_at: Option<NaiveDateTime>,
}

/// Body of `PUT /consultations/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ConsultationStatus,
}

/// Body of `PUT /consultations/{id}/assign`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAssignment {
    pub doctor_id: EntityId,
}
