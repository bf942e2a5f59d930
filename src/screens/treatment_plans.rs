//! Treatment plans and their ordered steps.

use std::sync::Arc;

use super::{
    check_date_order, fetch_owned, medication_options, patient_options, require,
    require_id, text_matches, LineItems, ResourceFamily, ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{
    same_id, EntityId, Medication, Patient, PlanItemType, TreatmentPlan, TreatmentPlanItem,
    TreatmentPlanStatus, User,
};
use crate::policy::Subject;

pub struct TreatmentPlansFamily;

#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub patient_id: Option<EntityId>,
    pub status: Option<TreatmentPlanStatus>,
}

impl ResourceFamily for TreatmentPlansFamily {
    type Item = TreatmentPlan;
    type Filter = PlanFilter;

    const SUBJECT: Subject = Subject::TreatmentPlans;
    const MESSAGES: FamilyMessages = messages::TREATMENT_PLANS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<TreatmentPlan>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &TreatmentPlan, search: &str, filter: &PlanFilter) -> bool {
        let patient_ok = filter
            .patient_id
            .as_ref()
            .map_or(true, |p| same_id(item.patient_id.as_ref(), Some(p)));
        patient_ok
            && filter.status.map_or(true, |s| s == item.status)
            && text_matches(
                search,
                &[
                    Some(&item.plan_name),
                    item.patient_name.as_deref(),
                    item.goals.as_deref(),
                ],
            )
    }

    fn draft(user: Option<&User>) -> TreatmentPlan {
        TreatmentPlan {
            doctor_id: user.and_then(|u| u.id.clone()),
            start_date: Some(chrono::Local::now().date_naive()),
            ..TreatmentPlan::default()
        }
    }

    fn validate(draft: &TreatmentPlan) -> Result<(), String> {
        require_id(draft.patient_id.as_ref())?;
        require(&draft.plan_name)?;
        draft.items.iter().try_for_each(|item| require(&item.title))?;
        check_date_order(draft.start_date, draft.end_date)
    }
}

impl LineItems for TreatmentPlan {
    type Line = TreatmentPlanItem;

    fn lines(&self) -> &[TreatmentPlanItem] {
        &self.items
    }

    fn lines_mut(&mut self) -> &mut Vec<TreatmentPlanItem> {
        &mut self.items
    }
}

/// Change a step's kind. Medication fields are dropped when the step is
/// no longer a medication.
pub fn set_item_type(item: &mut TreatmentPlanItem, item_type: PlanItemType) {
    item.item_type = item_type;
    if item_type != PlanItemType::Medication {
        item.medication_id = None;
        item.dosage = None;
        item.frequency = None;
    }
}

pub fn status_label(status: TreatmentPlanStatus) -> &'static str {
    match status {
        TreatmentPlanStatus::Active => "Đang thực hiện",
        TreatmentPlanStatus::Completed => "Hoàn thành",
        TreatmentPlanStatus::Paused => "Tạm dừng",
        TreatmentPlanStatus::Cancelled => "Đã hủy",
        TreatmentPlanStatus::Unknown => messages::UNKNOWN_VALUE,
    }
}

impl ResourceList<TreatmentPlansFamily> {
    /// Active plans of one patient, straight from the backend.
    pub async fn active_for(&self, patient_id: &EntityId) -> Vec<TreatmentPlan> {
        let plans = self.core().api().resource::<TreatmentPlan>();
        self.scoped_query(plans.active_for_patient(patient_id)).await
    }
}

// ═══════════════════════════════════════════════════════════
// Screen
// ═══════════════════════════════════════════════════════════

/// Plan list plus the patients and active medications its form picks from.
pub struct TreatmentPlanScreen {
    pub list: ResourceList<TreatmentPlansFamily>,
    patients: Vec<Patient>,
    medications: Vec<Medication>,
}

impl TreatmentPlanScreen {
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

    /// Attach an offered medication to step `index` of the open form. Only
    /// medication steps take one.
    pub fn pick_medication(&mut self, index: usize, id: &EntityId) -> bool {
        let Some(medication) = self
            .medications
            .iter()
            .find(|m| same_id(m.id.as_ref(), Some(id)))
        else {
            return false;
        };
        let Some(form) = self.list.form_mut() else {
            return false;
        };
        let is_medication_step = form
            .lines()
            .get(index)
            .is_some_and(|item| item.item_type == PlanItemType::Medication);
        is_medication_step
            && form.update_line(index, |item| item.medication_id = medication.id.clone())
    }
}
