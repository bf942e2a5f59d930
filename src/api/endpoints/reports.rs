//! `/reports/*`. Report bodies are read-only aggregates computed server side.

use crate::api::resource::path_segment;
use crate::api::{ApiClient, ApiError};
use crate::models::{DateRange, EntityId, ExportFormat, LabTestType, ReportData};

#[derive(Clone, Copy)]
pub struct ReportsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi { client: self }
    }
}

impl<'a> ReportsApi<'a> {
    /// `GET /reports/patient/{id}?startDate&endDate`
    pub async fn patient(&self, patient_id: &EntityId, range: DateRange) -> Result<ReportData, ApiError> {
        self.client
            .get(&format!(
                "reports/patient/{}?{}",
                path_segment(patient_id)?,
                range.query()
            ))
            .await
    }

    /// `GET /reports/treatment?startDate&endDate`
    pub async fn treatment(&self, range: DateRange) -> Result<ReportData, ApiError> {
        self.client
            .get(&format!("reports/treatment?{}", range.query()))
            .await
    }

    /// `GET /reports/medication-adherence/{id}?startDate&endDate`
    pub async fn adherence(&self, patient_id: &EntityId, range: DateRange) -> Result<ReportData, ApiError> {
        self.client
            .get(&format!(
                "reports/medication-adherence/{}?{}",
                path_segment(patient_id)?,
                range.query()
            ))
            .await
    }

    /// `GET /reports/lab-trends/{id}?testType&startDate&endDate`
    pub async fn lab_trends(
        &self,
        patient_id: &EntityId,
        test_type: LabTestType,
        range: DateRange,
    ) -> Result<ReportData, ApiError> {
        self.client
            .get(&format!(
                "reports/lab-trends/{}?testType={}&{}",
                path_segment(patient_id)?,
                test_type.as_str(),
                range.query()
            ))
            .await
    }

    /// `GET /reports/export/patient/{id}?format=` as raw file bytes.
    pub async fn export_patient(
        &self,
        patient_id: &EntityId,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ApiError> {
        self.client
            .get_bytes(&format!(
                "reports/export/patient/{}?format={}",
                path_segment(patient_id)?,
                format.as_str()
            ))
            .await
    }
}
