//! `/admin/*` and `/dashboard/stats`.

use reqwest::Method;

use crate::api::resource::path_segment;
use crate::api::{ApiClient, ApiError, Crud};
use crate::models::{DashboardStats, EntityId, SystemAction, SystemStats, User, UserStats};

/// Administrative namespace.
#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }
}

impl<'a> AdminApi<'a> {
    /// User CRUD under `/admin/users`.
    pub fn users(&self) -> Crud<'a, User> {
        self.client.resource::<User>()
    }

    /// `POST /admin/users/{id}/reset-password`
    pub async fn reset_password(&self, user_id: &EntityId) -> Result<(), ApiError> {
        let path = format!("admin/users/{}/reset-password", path_segment(user_id)?);
        self.client.execute(Method::POST, &path).await?;
        tracing::info!(user = %user_id, "Password reset requested");
        Ok(())
    }

    /// `GET /admin/system-stats`
    pub async fn system_stats(&self) -> Result<SystemStats, ApiError> {
        self.client.get("admin/system-stats").await
    }

    /// `GET /admin/user-stats`
    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.client.get("admin/user-stats").await
    }

    /// `GET /dashboard/stats`
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("dashboard/stats").await
    }

    /// `POST /admin/system/{action}`
    pub async fn run(&self, action: SystemAction) -> Result<(), ApiError> {
        self.client
            .execute(Method::POST, &format!("admin/system/{}", action.path()))
            .await?;
        tracing::info!(?action, "System action sent");
        Ok(())
    }
}
