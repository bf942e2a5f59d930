use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::{BookingChannel, ContactMethod, Gender, UrgencyLevel};

/// Draft collected by the anonymous booking wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousBooking {
    #[serde(default)]
    pub anonymous_id: String,
    pub contact_method: ContactMethod,
    #[serde(default)]
    pub contact_value: String,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub consultation_type: BookingChannel,
    pub age_range: Option<String>,
    pub gender: Option<Gender>,
    pub symptoms: Option<String>,
    pub urgency_level: UrgencyLevel,
    pub preferred_name: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub consent_to_treatment: bool,
    #[serde(default)]
    pub consent_to_data_processing: bool,
}

impl Default for AnonymousBooking {
    fn default() -> Self {
        Self {
            anonymous_id: String::new(),
            contact_method: ContactMethod::Phone,
            contact_value: String::new(),
            appointment_date: None,
            appointment_time: None,
            consultation_type: BookingChannel::Chat,
            age_range: None,
            gender: None,
            symptoms: None,
            urgency_level: UrgencyLevel::Normal,
            preferred_name: None,
            notes: None,
            consent_to_treatment: false,
            consent_to_data_processing: false,
        }
    }
}

impl AnonymousBooking {
    /// Combined slot, present once both date and time are chosen.
    pub fn slot(&self) -> Option<NaiveDateTime> {
        Some(self.appointment_date?.and_time(self.appointment_time?))
    }

    pub fn has_consents(&self) -> bool {
        self.consent_to_treatment && self.consent_to_data_processing
    }

    /// Appointment body for the booking endpoint: the draft plus the
    /// anonymous marker, a fixed title and the combined slot.
    pub fn appointment_payload(&self, slot: NaiveDateTime) -> serde_json::Value {
        let mut body = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(map) = body.as_object_mut() {
            map.insert("title".into(), ANONYMOUS_TITLE.into());
            map.insert("isAnonymous".into(), true.into());
            map.insert("patientId".into(), serde_json::Value::Null);
            map.insert(
                "appointmentDate".into(),
                slot.format("%Y-%m-%dT%H:%M:%S").to_string().into(),
            );
            map.remove("appointmentTime");
        }
        body
    }
}

/// Title given to anonymous consultations.
pub const ANONYMOUS_TITLE: &str = "Tư vấn ẩn danh";
