//! Formulary management.

use super::{require, text_matches, ResourceFamily};
use crate::messages::{self, FamilyMessages};
use crate::models::{Medication, MedicationCategory, User};
use crate::policy::Subject;

pub struct MedicationsFamily;

#[derive(Debug, Clone, Default)]
pub struct MedicationFilter {
    pub category: Option<MedicationCategory>,
    /// Hide discontinued entries.
    pub active_only: bool,
}

impl ResourceFamily for MedicationsFamily {
    type Item = Medication;
    type Filter = MedicationFilter;

    const SUBJECT: Subject = Subject::Medications;
    const MESSAGES: FamilyMessages = messages::MEDICATIONS;

    fn matches(item: &Medication, search: &str, filter: &MedicationFilter) -> bool {
        filter.category.map_or(true, |c| c == item.category)
            && (!filter.active_only || item.is_active)
            && text_matches(
                search,
                &[
                    Some(&item.name),
                    item.generic_name.as_deref(),
                    item.manufacturer.as_deref(),
                ],
            )
    }

    fn draft(_user: Option<&User>) -> Medication {
        Medication::default()
    }

    fn validate(draft: &Medication) -> Result<(), String> {
        require(&draft.name)
    }
}

pub fn category_label(category: MedicationCategory) -> &'static str {
    match category {
        MedicationCategory::Arv => "Thuốc ARV",
        MedicationCategory::Antibiotic => "Kháng sinh",
        MedicationCategory::Antifungal => "Kháng nấm",
        MedicationCategory::Antiviral => "Kháng virus",
        MedicationCategory::Supplement => "Thực phẩm bổ sung",
        MedicationCategory::Other => "Khác",
        MedicationCategory::Unknown => messages::UNKNOWN_VALUE,
    }
}
