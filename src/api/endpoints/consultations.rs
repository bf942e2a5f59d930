use reqwest::Method;

use crate::api::{ApiError, Crud};
use crate::models::{ChatMessage, Consultation, ConsultationStatus, DoctorAssignment, EntityId, StatusUpdate};

impl<'a> Crud<'a, Consultation> {
    /// `GET /consultations/doctor/{id}`
    pub async fn by_doctor(&self, doctor_id: &EntityId) -> Result<Vec<Consultation>, ApiError> {
        self.scoped("doctor", &doctor_id.to_string()).await
    }

    /// `PUT /consultations/{id}/status`
    pub async fn update_status(
        &self,
        id: &EntityId,
        status: ConsultationStatus,
    ) -> Result<(), ApiError> {
        let path = format!("{}/status", Self::item_path(id)?);
        self.client
            .execute_with(Method::PUT, &path, &StatusUpdate { status })
            .await?;
        tracing::info!(%id, %status, "Consultation status changed");
        Ok(())
    }

    /// `PUT /consultations/{id}/assign`
    pub async fn assign_doctor(&self, id: &EntityId, doctor_id: &EntityId) -> Result<(), ApiError> {
        let path = format!("{}/assign", Self::item_path(id)?);
        let body = DoctorAssignment {
            doctor_id: doctor_id.clone(),
        };
        self.client.execute_with(Method::PUT, &path, &body).await?;
        tracing::info!(%id, doctor = %doctor_id, "Doctor assigned");
        Ok(())
    }

    /// `GET /consultations/{id}/messages`
    pub async fn messages(&self, id: &EntityId) -> Result<Vec<ChatMessage>, ApiError> {
        self.client
            .get(&format!("{}/messages", Self::item_path(id)?))
            .await
    }

    /// `POST /consultations/{id}/messages`
    pub async fn send_message(
        &self,
        id: &EntityId,
        message: &ChatMessage,
    ) -> Result<ChatMessage, ApiError> {
        self.client
            .post(&format!("{}/messages", Self::item_path(id)?), message)
            .await
    }
}
