use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{wire, EntityId};

/// Append-only record of a dose taken or missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    pub prescription_id: Option<EntityId>,
    #[serde(default)]
    pub medication_name: String,
    #[serde(deserialize_with = "wire::date")]
    pub recorded_date: NaiveDate,
    pub taken: bool,
    pub notes: Option<String>,
}
