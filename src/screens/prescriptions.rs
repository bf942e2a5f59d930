//! Prescriptions with their ordered medication lines.

use std::sync::Arc;

use super::{
    check_date_order, fetch_owned, medication_options, patient_options, require_id,
    text_matches, LineItems, ResourceFamily, ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{same_id, EntityId, Medication, Patient, Prescription, PrescriptionItem, User};
use crate::policy::Subject;

pub struct PrescriptionsFamily;

impl ResourceFamily for PrescriptionsFamily {
    type Item = Prescription;
    type Filter = ();

    const SUBJECT: Subject = Subject::Prescriptions;
    const MESSAGES: FamilyMessages = messages::PRESCRIPTIONS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<Prescription>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &Prescription, search: &str, _filter: &()) -> bool {
        text_matches(
            search,
            &[
                item.patient_name.as_deref(),
                item.notes.as_deref(),
            ],
        ) || item
            .medications
            .iter()
            .any(|m| text_matches(search, &[m.medication_name.as_deref()]))
    }

    fn draft(_user: Option<&User>) -> Prescription {
        Prescription::default()
    }

    fn validate(draft: &Prescription) -> Result<(), String> {
        require_id(draft.patient_id.as_ref())?;
        check_date_order(draft.start_date, draft.end_date)?;
        draft
            .medications
            .iter()
            .try_for_each(|line| require_id(line.medication_id.as_ref()))
    }
}

impl LineItems for Prescription {
    type Line = PrescriptionItem;

    fn lines(&self) -> &[PrescriptionItem] {
        &self.medications
    }

    fn lines_mut(&mut self) -> &mut Vec<PrescriptionItem> {
        &mut self.medications
    }
}

/// Point a line at a catalogue medication, copying its display name.
pub fn select_medication(line: &mut PrescriptionItem, medication: &Medication) {
    line.medication_id = medication.id.clone();
    line.medication_name = Some(medication.name.clone());
}

// ═══════════════════════════════════════════════════════════
// Screen
// ═══════════════════════════════════════════════════════════

/// The prescription list with the patient and medication pickers of its
/// form. Pickers are only fetched for roles that can write prescriptions.
pub struct PrescriptionScreen {
    pub list: ResourceList<PrescriptionsFamily>,
    patients: Vec<Patient>,
    medications: Vec<Medication>,
}

impl PrescriptionScreen {
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let list = ResourceList::mount(core.clone()).await;
        let (patients, medications) = if list.can_create() {
            tokio::join!(patient_options(&core), medication_options(&core))
        } else {
            (Vec::new(), Vec::new())
        };
        Self {
            list,
            patients,
            medications,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// Point line `index` of the open form at the offered medication `id`.
    pub fn pick_medication(&mut self, index: usize, id: &EntityId) -> bool {
        let Some(medication) = self
            .medications
            .iter()
            .find(|m| same_id(m.id.as_ref(), Some(id)))
        else {
            return false;
        };
        self.list
            .form_mut()
            .is_some_and(|form| form.update_line(index, |line| select_medication(line, medication)))
    }
}
