//! Own-account edits made from the profile page.

use reqwest::Method;

use crate::api::resource::path_segment;
use crate::api::{ApiClient, ApiError};
use crate::models::{EntityId, PasswordChange, PersonalInfo, Role};

#[derive(Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi { client: self }
    }
}

/// Record that holds a role's personal details.
fn record_path(role: Role) -> &'static str {
    match role {
        Role::Patient => "patients",
        Role::Doctor => "doctors",
        Role::Admin | Role::Unknown => "admin/users",
    }
}

impl<'a> ProfileApi<'a> {
    /// `PUT /patients/{id}`, `/doctors/{id}` or `/admin/users/{id}`,
    /// whichever record belongs to `role`.
    pub async fn update_personal(
        &self,
        role: Role,
        user_id: &EntityId,
        info: &PersonalInfo,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}", record_path(role), path_segment(user_id)?);
        self.client.execute_with(Method::PUT, &path, info).await?;
        tracing::info!(user = %user_id, "Personal info updated");
        Ok(())
    }

    /// `PUT /users/{id}/password`
    pub async fn change_password(
        &self,
        user_id: &EntityId,
        change: &PasswordChange<'_>,
    ) -> Result<(), ApiError> {
        let path = format!("users/{}/password", path_segment(user_id)?);
        self.client.execute_with(Method::PUT, &path, change).await?;
        tracing::info!(user = %user_id, "Password changed");
        Ok(())
    }
}
