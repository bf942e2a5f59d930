use crate::api::resource::path_segment;
use crate::api::{ApiError, Crud};
use crate::models::{EntityId, TreatmentPlan};

impl<'a> Crud<'a, TreatmentPlan> {
    /// `GET /treatment-plans/patient/{id}/active`
    pub async fn active_for_patient(
        &self,
        patient_id: &EntityId,
    ) -> Result<Vec<TreatmentPlan>, ApiError> {
        let path = format!(
            "treatment-plans/patient/{}/active",
            path_segment(patient_id)?
        );
        self.client.get(&path).await
    }
}
