//! Patient registry and the per-patient detail page.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{report_failure, require, text_matches, ResourceFamily};
use crate::api::{ApiError, Resource};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{Appointment, EntityId, LabResult, Patient, PatientStatus, Prescription, User};
use crate::policy::Subject;

pub const INVALID_EMAIL: &str = "Email không hợp lệ";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub struct PatientsFamily;

#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    pub status: Option<PatientStatus>,
}

impl ResourceFamily for PatientsFamily {
    type Item = Patient;
    type Filter = PatientFilter;

    const SUBJECT: Subject = Subject::Patients;
    const MESSAGES: FamilyMessages = messages::PATIENTS;

    fn matches(item: &Patient, search: &str, filter: &PatientFilter) -> bool {
        let status_ok = filter.status.map_or(true, |s| s == item.status);
        status_ok
            && text_matches(
                search,
                &[
                    Some(&item.full_name),
                    item.email.as_deref(),
                    item.phone_number.as_deref(),
                ],
            )
    }

    fn draft(_user: Option<&User>) -> Patient {
        Patient::default()
    }

    fn validate(draft: &Patient) -> Result<(), String> {
        require(&draft.full_name)?;
        if let Some(email) = draft.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_email(email) {
                return Err(INVALID_EMAIL.to_string());
            }
        }
        Ok(())
    }
}

/// Loose `local@domain.tld` shape check, as the browser's email input does.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

// ═══════════════════════════════════════════════════════════
// Detail page
// ═══════════════════════════════════════════════════════════

/// One patient with the records joined by id.
#[derive(Debug, Clone, Default)]
pub struct PatientDetail {
    pub patient: Option<Patient>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,
    pub lab_results: Vec<LabResult>,
}

impl PatientDetail {
    /// Fetch the patient and the three patient-scoped collections. Any
    /// failure toasts once and yields an empty page.
    pub async fn load(core: &Arc<CoreState>, id: &EntityId) -> Self {
        match Self::try_load(core, id).await {
            Ok(detail) => detail,
            Err(e) => {
                report_failure(core, &e, messages::PATIENTS.load_failed);
                Self::default()
            }
        }
    }

    async fn try_load(core: &CoreState, id: &EntityId) -> Result<Self, ApiError> {
        let api = core.api();
        let (patients, appointments, prescriptions, labs) = (
            api.resource::<Patient>(),
            api.resource::<Appointment>(),
            api.resource::<Prescription>(),
            api.resource::<LabResult>(),
        );
        let (patient, appointments, prescriptions, lab_results) = tokio::try_join!(
            patients.get_by_id(id),
            appointments.by_patient(id),
            prescriptions.by_patient(id),
            labs.by_patient(id),
        )?;
        tracing::debug!(entity = Patient::NAME, %id, "Detail loaded");
        Ok(Self {
            patient: Some(patient),
            appointments,
            prescriptions,
            lab_results,
        })
    }
}
