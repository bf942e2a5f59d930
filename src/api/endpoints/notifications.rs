use reqwest::Method;

use crate::api::{ApiError, Crud};
use crate::models::{EntityId, Notification};

impl<'a> Crud<'a, Notification> {
    /// `GET /notifications/user/{id}`
    pub async fn by_user(&self, user_id: &EntityId) -> Result<Vec<Notification>, ApiError> {
        self.scoped("user", &user_id.to_string()).await
    }

    /// `PUT /notifications/{id}/read`
    pub async fn mark_read(&self, id: &EntityId) -> Result<(), ApiError> {
        self.client
            .execute(Method::PUT, &format!("{}/read", Self::item_path(id)?))
            .await
    }

    /// `PUT /notifications/mark-all-read`
    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client
            .execute(Method::PUT, "notifications/mark-all-read")
            .await
    }
}
