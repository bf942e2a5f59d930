use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationReminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<EntityId>,
    pub prescription_id: Option<EntityId>,
    pub medication_name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    /// Times of day as `HH:MM`.
    #[serde(default)]
    pub reminder_times: Vec<String>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for MedicationReminder {
    fn default() -> Self {
        Self {
            id: None,
            patient_id: None,
            prescription_id: None,
            medication_name: String::new(),
            dosage: String::new(),
            frequency: String::new(),
            reminder_times: vec!["08:00".to_string()],
            start_date: None,
            end_date: None,
            is_active: true,
            notes: None,
        }
    }
}

/// When the next dose is due relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextReminder {
    Today(NaiveTime),
    Tomorrow(NaiveTime),
    Unset,
}

impl MedicationReminder {
    /// Parsed reminder times, sorted; malformed entries are skipped.
    pub fn times(&self) -> Vec<NaiveTime> {
        let mut times: Vec<NaiveTime> = self
            .reminder_times
            .iter()
            .filter_map(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
            .collect();
        times.sort();
        times
    }

    /// First reminder later today, else the earliest one tomorrow.
    pub fn next_reminder(&self, now: NaiveDateTime) -> NextReminder {
        let times = self.times();
        let current = now.time();
        if let Some(t) = times.iter().find(|t| **t > current) {
            return NextReminder::Today(*t);
        }
        match times.first() {
            Some(t) => NextReminder::Tomorrow(*t),
            None => NextReminder::Unset,
        }
    }

    /// Active flag set and `today` inside the optional start/end window.
    pub fn is_currently_active(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        if self.start_date.is_some_and(|start| today < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| today > end) {
            return false;
        }
        true
    }
}
