use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{Gender, PatientStatus};
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub diagnosis_date: Option<NaiveDate>,
    pub status: PatientStatus,
    pub notes: Option<String>,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            id: None,
            full_name: String::new(),
            email: None,
            phone_number: None,
            date_of_birth: None,
            gender: Some(Gender::Male),
            address: None,
            emergency_contact: None,
            emergency_phone: None,
            diagnosis_date: None,
            status: PatientStatus::Active,
            notes: None,
        }
    }
}
