use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::LabTestType;
use super::{wire, EntityId};

/// Leading decimal number, optionally signed, with an optional exponent.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// A single lab test result.
///
/// `result` is kept as entered (e.g. `"<50"`, `"350"`); charting parses it
/// on demand and treats unparseable values as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub test_type: LabTestType,
    #[serde(default, deserialize_with = "wire::opt_date")]
    pub test_date: Option<NaiveDate>,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub reference_range: String,
    pub notes: Option<String>,
}

impl LabResult {
    /// Numeric value of the longest leading number in the result, so
    /// `"450 cells/μL"` reads as 450. `0.0` when there is none or the value
    /// is not finite.
    pub fn numeric_value(&self) -> f64 {
        LEADING_NUMBER
            .find(self.result.trim_start())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Re-seeds unit and reference range after a test type change.
    pub fn apply_test_type(&mut self, test_type: LabTestType) {
        self.test_type = test_type;
        self.unit = test_type.default_unit().to_string();
        self.reference_range = test_type.default_reference_range().to_string();
    }
}

impl Default for LabResult {
    fn default() -> Self {
        let test_type = LabTestType::Cd4Count;
        Self {
            id: None,
            patient_id: None,
            patient_name: None,
            test_type,
            test_date: None,
            result: String::new(),
            unit: test_type.default_unit().to_string(),
            reference_range: test_type.default_reference_range().to_string(),
            notes: None,
        }
    }
}
