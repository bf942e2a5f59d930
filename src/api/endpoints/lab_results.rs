use crate::api::{ApiError, Crud};
use crate::models::{LabResult, LabTestType};

impl<'a> Crud<'a, LabResult> {
    /// `GET /lab-results/test-type/{type}`
    pub async fn by_test_type(&self, test_type: LabTestType) -> Result<Vec<LabResult>, ApiError> {
        self.scoped("test-type", test_type.as_str()).await
    }
}
