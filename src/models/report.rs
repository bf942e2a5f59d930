use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Appointment, LabResult};

/// Report families offered by the reports dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Patient,
    Treatment,
    MedicationAdherence,
    LabTrends,
}

impl ReportKind {
    pub const ALL: &'static [ReportKind] = &[
        ReportKind::Patient,
        ReportKind::Treatment,
        ReportKind::MedicationAdherence,
        ReportKind::LabTrends,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Patient => "patient",
            ReportKind::Treatment => "treatment",
            ReportKind::MedicationAdherence => "medication-adherence",
            ReportKind::LabTrends => "lab-trends",
        }
    }

    /// Every kind except the clinic-wide treatment report is patient scoped.
    pub fn needs_patient(self) -> bool {
        !matches!(self, ReportKind::Treatment)
    }
}

/// Inclusive reporting window, sent as `startDate` / `endDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Query string fragment, e.g. `startDate=2024-01-01&endDate=2024-01-31`.
    pub fn query(&self) -> String {
        format!(
            "startDate={}&endDate={}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(default)]
    pub total_appointments: u64,
    #[serde(default)]
    pub total_prescriptions: u64,
    #[serde(default)]
    pub total_lab_results: u64,
    #[serde(default)]
    pub adherence_rate: f64,
}

/// Report body. Sections are optional; each report kind fills a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub summary: Option<ReportSummary>,
    #[serde(default)]
    pub chart_data: Option<serde_json::Value>,
    #[serde(default)]
    pub appointments: Option<Vec<Appointment>>,
    #[serde(default)]
    pub lab_results: Option<Vec<LabResult>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_query() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert!(range.is_ordered());
        assert_eq!(range.query(), "startDate=2024-01-01&endDate=2024-01-31");
    }

    #[test]
    fn partial_report_body() {
        let data: ReportData =
            serde_json::from_str(r#"{"summary":{"totalAppointments":4,"adherenceRate":92.5}}"#)
                .unwrap();
        let summary = data.summary.unwrap();
        assert_eq!(summary.total_appointments, 4);
        assert_eq!(summary.total_lab_results, 0);
        assert!(data.appointments.is_none());
    }
}
