//! Report dashboard: pick a report kind, a patient and a window, then
//! generate the aggregate or export the patient file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Local};

use super::{patient_options, report_failure};
use crate::api::ApiError;
use crate::core_state::CoreState;
use crate::messages;
use crate::models::{
    DateRange, EntityId, ExportFormat, LabTestType, Patient, ReportData, ReportKind,
};
use crate::policy::{can, Action, Subject};

/// Default reporting window, counted back from today.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{0}")]
    Validation(String),
    #[error("Action not permitted for this role")]
    Forbidden,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Could not write export: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ReportDashboard {
    core: Arc<CoreState>,
    pub kind: ReportKind,
    pub patient_id: Option<EntityId>,
    pub range: DateRange,
    /// Only read by the lab-trends report.
    pub test_type: LabTestType,
    patients: Vec<Patient>,
    report: Option<ReportData>,
    generating: bool,
}

impl ReportDashboard {
    pub fn new(core: Arc<CoreState>) -> Self {
        let today = Local::now().date_naive();
        Self {
            core,
            kind: ReportKind::Patient,
            patient_id: None,
            range: DateRange {
                start: today - Duration::days(DEFAULT_WINDOW_DAYS),
                end: today,
            },
            test_type: LabTestType::Cd4Count,
            patients: Vec::new(),
            report: None,
            generating: false,
        }
    }

    /// Construct and load the patient picker.
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let mut dashboard = Self::new(core);
        dashboard.patients = patient_options(&dashboard.core).await;
        dashboard
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn report(&self) -> Option<&ReportData> {
        self.report.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Switching kind drops the report built for the previous one.
    pub fn set_kind(&mut self, kind: ReportKind) {
        if self.kind != kind {
            self.kind = kind;
            self.report = None;
        }
    }

    /// Patient the current kind is scoped to. Toasts when one is needed
    /// but none is picked.
    fn scoped_patient(&self) -> Result<Option<EntityId>, ReportError> {
        if !self.kind.needs_patient() {
            return Ok(None);
        }
        match &self.patient_id {
            Some(id) => Ok(Some(id.clone())),
            None => Err(self.invalid(messages::SELECT_PATIENT)),
        }
    }

    fn invalid(&self, message: &str) -> ReportError {
        self.core.notifier().error(message);
        ReportError::Validation(message.to_string())
    }

    fn check_allowed(&self, action: Action) -> Result<(), ReportError> {
        if can(self.core.current_user().as_ref(), action, Subject::Reports) {
            Ok(())
        } else {
            self.core.notifier().error(messages::FORBIDDEN);
            Err(ReportError::Forbidden)
        }
    }

    /// Build the selected report for the selected window.
    pub async fn generate(&mut self) -> Result<&ReportData, ReportError> {
        self.check_allowed(Action::View)?;
        let patient_id = self.scoped_patient()?;
        if !self.range.is_ordered() {
            return Err(self.invalid(messages::DATE_RANGE_ORDER));
        }

        let reports = self.core.api().reports();
        self.generating = true;
        let result = match (self.kind, patient_id.as_ref()) {
            (ReportKind::Patient, Some(id)) => reports.patient(id, self.range).await,
            (ReportKind::MedicationAdherence, Some(id)) => reports.adherence(id, self.range).await,
            (ReportKind::LabTrends, Some(id)) => {
                reports.lab_trends(id, self.test_type, self.range).await
            }
            _ => reports.treatment(self.range).await,
        };
        self.generating = false;

        match result {
            Ok(data) => {
                tracing::info!(kind = self.kind.as_str(), "Report generated");
                self.core.notifier().success(messages::REPORT_GENERATED);
                Ok(&*self.report.insert(data))
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::REPORT_FAILED);
                Err(ReportError::Api(e))
            }
        }
    }

    /// Download the selected patient's file into `dir`. Returns the
    /// written path.
    pub async fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, ReportError> {
        self.check_allowed(Action::Export)?;
        let Some(patient_id) = self.patient_id.clone() else {
            return Err(self.invalid(messages::SELECT_PATIENT));
        };

        let bytes = match self
            .core
            .api()
            .reports()
            .export_patient(&patient_id, format)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                report_failure(&self.core, &e, messages::EXPORT_FAILED);
                return Err(ReportError::Api(e));
            }
        };

        let path = dir.join(export_file_name(&patient_id, format));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            tracing::error!(path = %path.display(), error = %e, "Export write failed");
            self.core.notifier().error(messages::EXPORT_FAILED);
            return Err(ReportError::Io(e));
        }
        tracing::info!(path = %path.display(), size = bytes.len(), "Report exported");
        self.core
            .notifier()
            .success(&messages::export_done(format.as_str()));
        Ok(path)
    }
}

/// `patient-report-{id}.{format}`. Anything in the id other than ASCII
/// letters, digits, `-` and `_` becomes `_`, so the name never leaves the
/// export directory.
pub fn export_file_name(patient_id: &EntityId, format: ExportFormat) -> String {
    let id: String = patient_id
        .to_string()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    format!("patient-report-{id}.{}", format.as_str())
}

pub fn kind_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Patient => "Báo cáo bệnh nhân",
        ReportKind::Treatment => "Báo cáo điều trị",
        ReportKind::MedicationAdherence => "Tuân thủ dùng thuốc",
        ReportKind::LabTrends => "Xu hướng xét nghiệm",
    }
}
