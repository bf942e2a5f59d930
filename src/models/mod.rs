//! REST entities exchanged with the clinic backend.
//!
//! Every entity is an opaque server resource: the client never holds
//! authoritative state, only the payload of the last fetch.

pub mod adherence;
pub mod admin;
pub mod appointment;
pub mod arv_regimen;
pub mod booking;
pub mod consultation;
pub mod education;
pub mod enums;
pub mod lab;
pub mod medication;
pub mod notification;
pub mod patient;
pub mod prescription;
pub mod reminder;
pub mod report;
pub mod side_effect;
pub mod treatment_plan;
pub mod user;
pub mod vital_sign;
pub mod wire;

pub use adherence::*;
pub use admin::*;
pub use appointment::*;
pub use arv_regimen::*;
pub use booking::*;
pub use consultation::*;
pub use education::*;
pub use enums::*;
pub use lab::*;
pub use medication::*;
pub use notification::*;
pub use patient::*;
pub use prescription::*;
pub use reminder::*;
pub use report::*;
pub use side_effect::*;
pub use treatment_plan::*;
pub use user::*;
pub use vital_sign::*;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier. The backend uses numeric ids for most
/// resources but some endpoints hand back strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// True when both ids denote the same resource, tolerating a numeric
    /// id that arrived as a string.
    pub fn same_as(&self, other: &EntityId) -> bool {
        match (self, other) {
            (EntityId::Number(a), EntityId::Number(b)) => a == b,
            (EntityId::Text(a), EntityId::Text(b)) => a == b,
            (EntityId::Number(n), EntityId::Text(s)) | (EntityId::Text(s), EntityId::Number(n)) => {
                s.trim().parse::<i64>().map(|v| v == *n).unwrap_or(false)
            }
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::Text(value)
    }
}

/// Optional-id comparison used by client-side joins (`patientId == id`).
pub fn same_id(a: Option<&EntityId>, b: Option<&EntityId>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_as(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_accepts_number_and_string() {
        let n: EntityId = serde_json::from_str("42").unwrap();
        let s: EntityId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(n, EntityId::Number(42));
        assert_eq!(s, EntityId::Text("abc-1".into()));
        assert_eq!(n.to_string(), "42");
        assert_eq!(s.to_string(), "abc-1");
    }

    #[test]
    fn same_as_tolerates_stringified_numbers() {
        assert!(EntityId::from(7).same_as(&EntityId::from("7")));
        assert!(!EntityId::from(7).same_as(&EntityId::from("8")));
        assert!(!EntityId::from(7).same_as(&EntityId::from("seven")));
    }

    #[test]
    fn same_id_requires_both_present() {
        let id = EntityId::from(1);
        assert!(same_id(Some(&id), Some(&EntityId::from(1))));
        assert!(!same_id(Some(&id), None));
        assert!(!same_id(None, None));
    }
}
