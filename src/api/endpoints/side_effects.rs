use crate::api::{ApiError, Crud};
use crate::models::{EntityId, SideEffect};

impl<'a> Crud<'a, SideEffect> {
    /// `GET /side-effects/medication/{id}`
    pub async fn by_medication(&self, medication_id: &EntityId) -> Result<Vec<SideEffect>, ApiError> {
        self.scoped("medication", &medication_id.to_string()).await
    }
}
