//! `POST /auth/login` and `POST /auth/register`.

use crate::api::{ApiClient, ApiError};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::session::AuthBackend;

impl AuthBackend for ApiClient {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ApiError> {
        self.post("auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post("auth/register", request).await
    }
}
