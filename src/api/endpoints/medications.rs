use crate::api::{ApiError, Crud};
use crate::models::{Medication, MedicationCategory};

impl<'a> Crud<'a, Medication> {
    /// `GET /medications/category/{category}`
    pub async fn by_category(&self, category: MedicationCategory) -> Result<Vec<Medication>, ApiError> {
        self.scoped("category", category.as_str()).await
    }
}
