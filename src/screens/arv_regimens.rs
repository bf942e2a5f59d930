//! ARV regimen catalogue.
//!
//! A regimen may carry a target group, a treatment line, both or neither.
//! The two filters are independent: a regimen without a target group never
//! matches a target group filter, whatever its line.

use std::sync::Arc;

use super::{require, text_matches, LineItems, ResourceFamily, ResourceList};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{
    same_id, ArvRegimen, EntityId, Medication, MedicationCategory, RegimenMedication, TargetGroup,
    TreatmentLine, User,
};
use crate::policy::Subject;

pub struct ArvRegimensFamily;

#[derive(Debug, Clone, Default)]
pub struct RegimenFilter {
    pub target_group: Option<TargetGroup>,
    pub line: Option<TreatmentLine>,
}

impl ResourceFamily for ArvRegimensFamily {
    type Item = ArvRegimen;
    type Filter = RegimenFilter;

    const SUBJECT: Subject = Subject::ArvRegimens;
    const MESSAGES: FamilyMessages = messages::ARV_REGIMENS;

    fn matches(item: &ArvRegimen, search: &str, filter: &RegimenFilter) -> bool {
        let group_ok = filter
            .target_group
            .map_or(true, |g| item.target_group == Some(g));
        let line_ok = filter.line.map_or(true, |l| item.line == Some(l));
        group_ok
            && line_ok
            && (text_matches(search, &[Some(&item.name), item.description.as_deref()])
                || item
                    .medications
                    .iter()
                    .any(|m| text_matches(search, &[m.medication_name.as_deref()])))
    }

    fn draft(_user: Option<&User>) -> ArvRegimen {
        ArvRegimen::default()
    }

    fn validate(draft: &ArvRegimen) -> Result<(), String> {
        require(&draft.name)
    }
}

impl LineItems for ArvRegimen {
    type Line = RegimenMedication;

    fn lines(&self) -> &[RegimenMedication] {
        &self.medications
    }

    fn lines_mut(&mut self) -> &mut Vec<RegimenMedication> {
        &mut self.medications
    }
}

pub fn target_group_label(group: TargetGroup) -> &'static str {
    match group {
        TargetGroup::Adult => "Người lớn",
        TargetGroup::Pediatric => "Trẻ em",
        TargetGroup::Pregnant => "Phụ nữ mang thai",
        TargetGroup::Elderly => "Người cao tuổi",
        TargetGroup::RenalImpairment => "Suy thận",
        TargetGroup::HepaticImpairment => "Suy gan",
        TargetGroup::Unknown => messages::UNKNOWN_VALUE,
    }
}

pub fn line_label(line: TreatmentLine) -> &'static str {
    match line {
        TreatmentLine::FirstLine => "Bậc 1",
        TreatmentLine::SecondLine => "Bậc 2",
        TreatmentLine::ThirdLine => "Bậc 3",
        TreatmentLine::Salvage => "Cứu vãn",
        TreatmentLine::Unknown => messages::UNKNOWN_VALUE,
    }
}

/// Copy an ARV medication into a regimen line.
pub fn select_medication(line: &mut RegimenMedication, medication: &Medication) {
    line.medication_id = medication.id.clone();
    line.medication_name = Some(medication.name.clone());
}

// ═══════════════════════════════════════════════════════════
// Screen
// ═══════════════════════════════════════════════════════════

/// Regimen catalogue with the ARV medications a regimen line can name.
pub struct ArvRegimenScreen {
    pub list: ResourceList<ArvRegimensFamily>,
    medications: Vec<Medication>,
}

impl ArvRegimenScreen {
    /// Regimens and ARV medications load together. A failed medication
    /// load only leaves the picker empty.
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let medication_api = core.api().resource::<Medication>();
        let medications = medication_api.by_category(MedicationCategory::Arv);
        let (list, medications) = tokio::join!(ResourceList::mount(core.clone()), medications);
        let medications = match medications {
            Ok(found) => found
                .into_iter()
                .filter(|m| m.category == MedicationCategory::Arv)
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "ARV medication load failed");
                Vec::new()
            }
        };
        Self { list, medications }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// Point line `index` of the open form at ARV medication `id`.
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
