use crate::api::{ApiError, Crud};
use crate::models::{EducationCategory, EducationalContent};

impl<'a> Crud<'a, EducationalContent> {
    /// `GET /educational-content/category/{category}`
    pub async fn by_category(
        &self,
        category: EducationCategory,
    ) -> Result<Vec<EducationalContent>, ApiError> {
        self.scoped("category", category.as_str()).await
    }

    /// `GET /educational-content/published`
    pub async fn published(&self) -> Result<Vec<EducationalContent>, ApiError> {
        self.client.get("educational-content/published").await
    }
}
