//! Daily dose log for one patient, with the 30-day adherence rate.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::{own_patient_id, report_failure};
use crate::core_state::CoreState;
use crate::messages;
use crate::models::{AdherenceRecord, EntityId, Prescription, PrescriptionItem};
use crate::policy::{can, Action, Subject};
use crate::views::adherence::{self, AdherenceStats};

/// One medication line of a prescription and what was logged for it on
/// the selected date.
#[derive(Debug, Clone)]
pub struct DoseRow<'a> {
    pub prescription: &'a Prescription,
    pub line: &'a PrescriptionItem,
    pub logged: Option<&'a AdherenceRecord>,
}

pub struct AdherenceTracker {
    core: Arc<CoreState>,
    patient_id: Option<EntityId>,
    selected_date: NaiveDate,
    records: Vec<AdherenceRecord>,
    prescriptions: Vec<Prescription>,
    loading: bool,
}

impl AdherenceTracker {
    /// Tracker for the signed-in patient, on today's date.
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let patient_id = own_patient_id(core.current_user().as_ref());
        Self::mount_for(core, patient_id).await
    }

    /// Tracker for any patient; staff pick the patient.
    pub async fn mount_for(core: Arc<CoreState>, patient_id: Option<EntityId>) -> Self {
        let mut tracker = Self {
            core,
            patient_id,
            selected_date: Local::now().date_naive(),
            records: Vec::new(),
            prescriptions: Vec::new(),
            loading: true,
        };
        tracker.refresh().await;
        tracker
    }

    /// Reload the dose log and prescriptions together. Either failing
    /// keeps the previous data.
    pub async fn refresh(&mut self) -> bool {
        let Some(patient_id) = self.patient_id.clone() else {
            self.loading = false;
            return false;
        };
        self.loading = true;
        let api = self.core.api();
        let records = api.resource::<AdherenceRecord>();
        let prescriptions = api.resource::<Prescription>();
        let result = tokio::try_join!(
            records.by_patient(&patient_id),
            prescriptions.by_patient(&patient_id)
        );
        self.loading = false;
        match result {
            Ok((records, prescriptions)) => {
                self.records = records;
                self.prescriptions = prescriptions;
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::ADHERENCE.load_failed);
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn patient_id(&self) -> Option<&EntityId> {
        self.patient_id.as_ref()
    }

    pub fn records(&self) -> &[AdherenceRecord] {
        &self.records
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Pick the day to log. Future days are clamped to today.
    pub async fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date.min(Local::now().date_naive());
        self.refresh().await;
    }

    /// Headline rate over the 30 days before today.
    pub fn stats(&self) -> AdherenceStats {
        adherence::stats(&self.records, Local::now().date_naive())
    }

    pub fn missed_this_week(&self) -> usize {
        adherence::missed_recently(&self.records, Local::now().date_naive())
    }

    /// Every prescribed medication for the selected day.
    pub fn doses(&self) -> Vec<DoseRow<'_>> {
        self.prescriptions
            .iter()
            .flat_map(|p| p.medications.iter().map(move |line| (p, line)))
            .map(|(prescription, line)| DoseRow {
                prescription,
                line,
                logged: adherence::logged_dose(
                    &self.records,
                    prescription.id.as_ref(),
                    line.medication_name.as_deref().unwrap_or(""),
                    self.selected_date,
                ),
            })
            .collect()
    }

    /// Append a taken or missed entry for the selected day, then reload.
    pub async fn record(
        &mut self,
        prescription_id: Option<EntityId>,
        medication_name: &str,
        taken: bool,
        notes: Option<String>,
    ) -> bool {
        if !can(self.core.current_user().as_ref(), Action::Create, Subject::Adherence) {
            self.core.notifier().error(messages::FORBIDDEN);
            return false;
        }
        let record = AdherenceRecord {
            id: None,
            patient_id: self.patient_id.clone(),
            prescription_id,
            medication_name: medication_name.to_string(),
            recorded_date: self.selected_date,
            taken,
            notes,
        };
        match self
            .core
            .api()
            .resource::<AdherenceRecord>()
            .record(&record)
            .await
        {
            Ok(_) => {
                let done = if taken {
                    messages::DOSE_TAKEN
                } else {
                    messages::DOSE_MISSED
                };
                self.core.notifier().success(done);
                self.refresh().await;
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::ADHERENCE.create_failed);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::Role;
    use crate::views::adherence::AdherenceRating;
    use chrono::Days;
    use serde_json::json;

    fn day(days_ago: u64) -> String {
        Local::now()
            .date_naive()
            .checked_sub_days(Days::new(days_ago))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    }

    #[tokio::test]
    async fn seven_of_ten_is_seventy_percent() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let records: Vec<_> = (0..10)
            .map(|i| {
                json!({"patientId": 7, "medicationName": "TDF", "recordedDate": day(i),
                       "taken": i < 7})
            })
            .collect();
        fx.backend.seed("medication-adherence", records);

        let tracker = AdherenceTracker::mount(fx.core.clone()).await;

        let stats = tracker.stats();
        assert_eq!(stats.total_doses, 10);
        assert_eq!(stats.taken_doses, 7);
        assert_eq!(stats.rate, 70);
        assert_eq!(stats.rating(), AdherenceRating::Fair);
    }

    #[tokio::test]
    async fn recording_a_dose_fills_the_row() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "prescriptions",
            vec![json!({"patientId": 7, "medications": [
                {"medicationId": 1, "medicationName": "TDF/3TC/DTG", "dosage": "1 viên"}
            ]})],
        );
        let mut tracker = AdherenceTracker::mount(fx.core.clone()).await;
        let rows = tracker.doses();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].logged.is_none());
        let prescription_id = rows[0].prescription.id.clone();

        assert!(tracker.record(prescription_id, "TDF/3TC/DTG", true, None).await);

        assert_eq!(fx.toasts.last().unwrap().message, messages::DOSE_TAKEN);
        assert_eq!(fx.backend.requests_to("medication-adherence/record").len(), 1);
        let rows = tracker.doses();
        assert!(rows[0].logged.is_some_and(|r| r.taken));
    }

    #[tokio::test]
    async fn load_failure_keeps_previous_log() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "medication-adherence",
            vec![json!({"patientId": 7, "medicationName": "TDF", "recordedDate": day(1),
                        "taken": false})],
        );
        let mut tracker = AdherenceTracker::mount(fx.core.clone()).await;
        assert_eq!(tracker.missed_this_week(), 1);

        fx.backend.fail("prescriptions");
        assert!(!tracker.refresh().await);
        assert_eq!(tracker.records().len(), 1);
        assert_eq!(
            fx.toasts.last().unwrap().message,
            messages::ADHERENCE.load_failed
        );
    }

    #[tokio::test]
    async fn staff_without_patient_loads_nothing() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        let tracker = AdherenceTracker::mount(fx.core.clone()).await;
        assert!(tracker.patient_id().is_none());
        assert!(!tracker.is_loading());
        assert!(fx.backend.requests_to("medication-adherence").is_empty());
    }
}
