//! Medication reminders kept by a patient.

use std::sync::{Arc, LazyLock};

use chrono::{Local, NaiveDateTime};
use regex::Regex;

use super::{
    check_date_order, fetch_owned, own_patient_id, report_failure, require, text_matches,
    LineItems, ResourceFamily, ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{
    same_id, EntityId, MedicationReminder, NextReminder, Prescription, PrescriptionItem, User,
};
use crate::policy::{Action, Subject};

pub const INVALID_TIME: &str = "Giờ nhắc nhở không hợp lệ (HH:MM)";

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());
pub const PRESCRIPTIONS_LOAD_FAILED: &str = "Không thể tải danh sách đơn thuốc";

pub struct RemindersFamily;

#[derive(Debug, Clone, Default)]
pub struct ReminderFilter {
    pub active_only: bool,
}

impl ResourceFamily for RemindersFamily {
    type Item = MedicationReminder;
    type Filter = ReminderFilter;

    const SUBJECT: Subject = Subject::Reminders;
    const MESSAGES: FamilyMessages = messages::REMINDERS;

    async fn fetch(
        api: &ApiClient,
        user: Option<&User>,
    ) -> Result<Vec<MedicationReminder>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &MedicationReminder, search: &str, filter: &ReminderFilter) -> bool {
        (!filter.active_only || item.is_currently_active(Local::now().date_naive()))
            && text_matches(search, &[Some(&item.medication_name), item.notes.as_deref()])
    }

    fn draft(user: Option<&User>) -> MedicationReminder {
        MedicationReminder {
            patient_id: own_patient_id(user),
            start_date: Some(Local::now().date_naive()),
            ..MedicationReminder::default()
        }
    }

    /// Blank time rows are ignored; anything else must be `HH:MM`.
    fn validate(draft: &MedicationReminder) -> Result<(), String> {
        require(&draft.medication_name)?;
        let filled: Vec<&String> = draft
            .reminder_times
            .iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        if filled.is_empty() {
            return Err(messages::REQUIRED_FIELD.to_string());
        }
        if !filled.iter().all(|t| is_clock_time(t)) {
            return Err(INVALID_TIME.to_string());
        }
        check_date_order(draft.start_date, draft.end_date)
    }

    fn prepare(draft: &MedicationReminder, user: Option<&User>) -> MedicationReminder {
        let mut payload = draft.clone();
        if let Some(id) = own_patient_id(user) {
            payload.patient_id = Some(id);
        }
        payload.reminder_times.retain(|t| !t.trim().is_empty());
        payload
    }
}

impl LineItems for MedicationReminder {
    type Line = String;

    fn lines(&self) -> &[String] {
        &self.reminder_times
    }

    fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.reminder_times
    }
}

/// 24-hour `HH:MM`.
pub fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME.is_match(value.trim())
}

/// Link a reminder to a prescription. Medication fields are cleared until
/// one of its lines is picked.
pub fn select_prescription(draft: &mut MedicationReminder, prescription: &Prescription) {
    draft.prescription_id = prescription.id.clone();
    draft.medication_name.clear();
    draft.dosage.clear();
    draft.frequency.clear();
}

/// Copy name, dosage and frequency from a prescription line.
pub fn select_line(draft: &mut MedicationReminder, line: &PrescriptionItem) {
    draft.medication_name = line.medication_name.clone().unwrap_or_default();
    draft.dosage = line.dosage.clone();
    draft.frequency = line.frequency.clone();
}

/// The signed-in patient's prescriptions, for the form's picker.
pub async fn prescription_options(core: &CoreState) -> Vec<Prescription> {
    let Some(id) = own_patient_id(core.current_user().as_ref()) else {
        return Vec::new();
    };
    match core
        .api()
        .resource::<Prescription>()
        .by_patient(&id)
        .await
    {
        Ok(prescriptions) => prescriptions,
        Err(e) => {
            report_failure(core, &e, PRESCRIPTIONS_LOAD_FAILED);
            Vec::new()
        }
    }
}

pub fn next_label(next: NextReminder) -> String {
    match next {
        NextReminder::Today(t) => format!("Hôm nay {}", t.format("%H:%M")),
        NextReminder::Tomorrow(t) => format!("Ngày mai {}", t.format("%H:%M")),
        NextReminder::Unset => "Chưa đặt".to_string(),
    }
}

impl ResourceList<RemindersFamily> {
    /// Next reminder of every visible row.
    pub fn schedule(&self, now: NaiveDateTime) -> Vec<(&MedicationReminder, NextReminder)> {
        self.visible()
            .into_iter()
            .map(|r| (r, r.next_reminder(now)))
            .collect()
    }

    /// Log a dose as taken, then refetch.
    pub async fn mark_taken(&mut self, id: &EntityId) -> bool {
        if !self.allows(Action::Edit) {
            self.core().notifier().error(messages::FORBIDDEN);
            return false;
        }
        let core: Arc<CoreState> = self.core().clone();
        match core.api().resource::<MedicationReminder>().mark_taken(id).await {
            Ok(()) => {
                core.notifier().success(messages::DOSE_TAKEN);
                self.refresh().await;
                true
            }
            Err(e) => {
                report_failure(&core, &e, messages::DOSE_RECORD_FAILED);
                false
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Screen
// ═══════════════════════════════════════════════════════════

/// Reminder list with the patient's own prescriptions for the form.
pub struct ReminderScreen {
    pub list: ResourceList<RemindersFamily>,
    prescriptions: Vec<Prescription>,
}

impl ReminderScreen {
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let (list, prescriptions) =
            tokio::join!(ResourceList::mount(core.clone()), prescription_options(&core));
        Self {
            list,
            prescriptions,
        }
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    /// The prescription the open form is linked to.
    pub fn selected_prescription(&self) -> Option<&Prescription> {
        let linked = self.list.form()?.draft.prescription_id.as_ref()?;
        self.prescriptions
            .iter()
            .find(|p| same_id(p.id.as_ref(), Some(linked)))
    }

    /// Link the open form to one of the offered prescriptions.
    pub fn pick_prescription(&mut self, id: &EntityId) -> bool {
        let Some(prescription) = self
            .prescriptions
            .iter()
            .find(|p| same_id(p.id.as_ref(), Some(id)))
        else {
            return false;
        };
        match self.list.form_mut() {
            Some(form) => {
                select_prescription(&mut form.draft, prescription);
                true
            }
            None => false,
        }
    }

    /// Fill the open form from line `index` of the linked prescription.
    pub fn pick_line(&mut self, index: usize) -> bool {
        let Some(line) = self
            .selected_prescription()
            .and_then(|p| p.medications.get(index))
            .cloned()
        else {
            return false;
        };
        match self.list.form_mut() {
            Some(form) => {
                select_line(&mut form.draft, &line);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::Role;
    use serde_json::json;

    #[test]
    fn clock_time_format() {
        assert!(is_clock_time("08:00"));
        assert!(is_clock_time("23:59"));
        assert!(!is_clock_time("24:00"));
        assert!(!is_clock_time("8:00"));
        assert!(!is_clock_time("08:60"));
    }

    #[test]
    fn picking_a_line_copies_dose() {
        let mut draft = MedicationReminder::default();
        let rx = Prescription {
            id: Some(EntityId::from(5)),
            ..Prescription::default()
        };
        select_prescription(&mut draft, &rx);
        assert_eq!(draft.prescription_id, Some(EntityId::from(5)));

        let line = PrescriptionItem {
            medication_name: Some("TDF/3TC/DTG".into()),
            dosage: "1 viên".into(),
            frequency: "1 lần/ngày".into(),
            ..PrescriptionItem::default()
        };
        select_line(&mut draft, &line);
        assert_eq!(draft.medication_name, "TDF/3TC/DTG");
        assert_eq!(draft.dosage, "1 viên");
    }

    #[tokio::test]
    async fn blank_times_dropped_on_submit() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut list = ResourceList::<RemindersFamily>::mount(fx.core.clone()).await;
        let form = list.open_create().unwrap();
        form.draft.medication_name = "TDF/3TC/DTG".into();
        let blank = form.add_line();
        let evening = form.add_line();
        form.update_line(evening, |t| *t = "20:00".into());
        assert_eq!(form.lines()[blank], "");

        list.submit_form().await.unwrap();

        let stored = &fx.backend.items("medication-reminders")[0];
        assert_eq!(stored["reminderTimes"], json!(["08:00", "20:00"]));
        assert_eq!(stored["patientId"], 7);
    }

    #[tokio::test]
    async fn malformed_time_is_rejected() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut list = ResourceList::<RemindersFamily>::mount(fx.core.clone()).await;
        let form = list.open_create().unwrap();
        form.draft.medication_name = "TDF".into();
        form.draft.reminder_times = vec!["8h".into()];

        assert!(list.submit_form().await.is_err());
        assert_eq!(fx.toasts.last().unwrap().message, INVALID_TIME);
    }

    #[tokio::test]
    async fn mark_taken_toasts_and_refetches() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "medication-reminders",
            vec![json!({"patientId": 7, "medicationName": "TDF", "reminderTimes": ["08:00"]})],
        );
        let mut list = ResourceList::<RemindersFamily>::mount(fx.core.clone()).await;
        let id = list.items()[0].id.clone().unwrap();
        let before = fx.backend.requests_to("medication-reminders/patient/7").len();

        assert!(list.mark_taken(&id).await);

        assert_eq!(fx.toasts.last().unwrap().message, messages::DOSE_TAKEN);
        assert_eq!(
            fx.backend.requests_to("medication-reminders/patient/7").len(),
            before + 1
        );
    }

    #[test]
    fn next_labels() {
        assert_eq!(next_label(NextReminder::Unset), "Chưa đặt");
        let eight = chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(next_label(NextReminder::Today(eight)), "Hôm nay 08:00");
    }

    #[tokio::test]
    async fn form_fills_from_own_prescription_line() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "prescriptions",
            vec![
                json!({"id": 5, "patientId": 7, "medications": [
                    {"medicationId": 11, "medicationName": "TDF/3TC/DTG", "dosage": "1 viên", "frequency": "1 lần/ngày"}
                ]}),
                json!({"id": 6, "patientId": 8, "medications": []}),
            ],
        );
        let mut screen = ReminderScreen::mount(fx.core.clone()).await;
        assert_eq!(screen.prescriptions().len(), 1);

        screen.list.open_create().unwrap();
        assert!(!screen.pick_prescription(&EntityId::from(6)));
        assert!(!screen.pick_line(0));
        assert!(screen.pick_prescription(&EntityId::from(5)));
        assert!(screen.pick_line(0));
        assert!(!screen.pick_line(1));

        let draft = &screen.list.form().unwrap().draft;
        assert_eq!(draft.prescription_id, Some(EntityId::from(5)));
        assert_eq!(draft.medication_name, "TDF/3TC/DTG");
        assert_eq!(draft.frequency, "1 lần/ngày");
    }
}
