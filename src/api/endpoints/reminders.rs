//! Medication reminders and the adherence log.

use reqwest::Method;

use crate::api::{ApiError, Crud};
use crate::models::{AdherenceRecord, EntityId, MedicationReminder};

impl<'a> Crud<'a, MedicationReminder> {
    /// `PUT /medication-reminders/{id}/taken`
    pub async fn mark_taken(&self, id: &EntityId) -> Result<(), ApiError> {
        self.client
            .execute(Method::PUT, &format!("{}/taken", Self::item_path(id)?))
            .await?;
        tracing::info!(%id, "Dose marked taken");
        Ok(())
    }
}

impl<'a> Crud<'a, AdherenceRecord> {
    /// `POST /medication-adherence/record`. Appends; records are never edited.
    pub async fn record(&self, record: &AdherenceRecord) -> Result<AdherenceRecord, ApiError> {
        self.client.post("medication-adherence/record", record).await
    }
}
