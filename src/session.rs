//! Session service: the only owner of the bearer token and current user.
//!
//! Lifecycle:
//! - `Loading` until `hydrate()` has read durable storage
//! - `Authenticated(user)` after hydrate or a successful login
//! - `Unauthenticated` after logout, expiry or an empty store
//!
//! State lives behind a `std::sync::RwLock` and is never held across an
//! `.await`. Storage is written before the in-memory state changes so a
//! crash never leaves a user in memory without a persisted token.

use std::future::Future;
use std::sync::{Arc, RwLock};

use crate::api::ApiError;
use crate::config::{LOGIN_PATH, TOKEN_KEY, USER_KEY};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
use crate::router::{AuthView, Navigator};
use crate::storage::{DurableStorage, StorageError};

/// Fallback shown when the server gives no reason for a failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Đăng nhập thất bại";
pub const REGISTER_FAILED_MESSAGE: &str = "Đăng ký thất bại";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Stored user record is corrupt: {0}")]
    CorruptUser(#[from] serde_json::Error),
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Session lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// Result of a login attempt. Login never errors; callers branch on this.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(User),
    Failure { message: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }
}

/// Result of a self-registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    Success,
    Failure { message: String },
}

/// Auth endpoints the session service depends on. Implemented by
/// `ApiClient`; tests may substitute a scripted backend.
pub trait AuthBackend: Send + Sync {
    fn login(
        &self,
        request: &LoginRequest<'_>,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<RegisterResponse, ApiError>> + Send;
}

// ═══════════════════════════════════════════════════════════
// SessionService
// ═══════════════════════════════════════════════════════════

pub struct SessionService {
    storage: Arc<dyn DurableStorage>,
    navigator: Arc<Navigator>,
    state: RwLock<SessionState>,
}

impl SessionService {
    /// New service in the `Loading` state. Call [`hydrate`](Self::hydrate)
    /// before resolving routes.
    pub fn new(storage: Arc<dyn DurableStorage>, navigator: Arc<Navigator>) -> Self {
        Self {
            storage,
            navigator,
            state: RwLock::new(SessionState::Loading),
        }
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn storage(&self) -> &Arc<dyn DurableStorage> {
        &self.storage
    }

    /// Restore token and user from storage.
    ///
    /// A corrupt or half-written session (token without user or the
    /// reverse) is cleared and treated as signed out.
    pub fn hydrate(&self) -> SessionState {
        let next = match self.read_stored_user() {
            Ok(Some(user)) => {
                tracing::info!(role = %user.role, "Session restored");
                SessionState::Authenticated(user)
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = self.clear_storage() {
                    tracing::error!(error = %e, "Failed to clear session storage");
                }
                SessionState::Unauthenticated
            }
        };
        self.set_state(next.clone());
        next
    }

    fn read_stored_user(&self) -> Result<Option<User>, SessionError> {
        let token = self.storage.get(TOKEN_KEY)?;
        let user = self.storage.get(USER_KEY)?;
        match (token, user) {
            (Some(_), Some(raw)) => Ok(Some(serde_json::from_str(&raw)?)),
            (None, None) => Ok(None),
            _ => {
                self.clear_storage()?;
                Ok(None)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or(SessionState::Unauthenticated)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state(), SessionState::Loading)
    }

    pub fn current_user(&self) -> Option<User> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Route-resolution view over the current state.
    pub fn with_auth_view<R>(&self, f: impl FnOnce(AuthView<'_>) -> R) -> R {
        match self.state() {
            SessionState::Loading => f(AuthView::Loading),
            SessionState::Authenticated(user) => f(AuthView::SignedIn(&user)),
            SessionState::Unauthenticated => f(AuthView::SignedOut),
        }
    }

    /// Bearer token for the next request, if one is stored.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read token");
                None
            }
        }
    }

    /// Sign in. Persists token and user on success.
    pub async fn login<B: AuthBackend>(
        &self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> LoginOutcome {
        let request = LoginRequest { email, password };
        let response = match backend.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                return LoginOutcome::Failure {
                    message: e.server_message().unwrap_or(LOGIN_FAILED_MESSAGE).to_string(),
                };
            }
        };

        let (token, user) = match (response.success, response.token, response.user) {
            (true, Some(token), Some(user)) if !token.is_empty() => (token, user),
            _ => {
                return LoginOutcome::Failure {
                    message: response
                        .message
                        .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
                };
            }
        };

        if let Err(e) = self.persist(&token, &user) {
            tracing::error!(error = %e, "Failed to persist session");
            return LoginOutcome::Failure {
                message: LOGIN_FAILED_MESSAGE.to_string(),
            };
        }
        tracing::info!(role = %user.role, "Signed in");
        self.set_state(SessionState::Authenticated(user.clone()));
        LoginOutcome::Success(user)
    }

    fn persist(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &raw)?;
        Ok(())
    }

    /// Self-registration pass-through. Does not sign the user in.
    pub async fn register<B: AuthBackend>(
        &self,
        backend: &B,
        request: &RegisterRequest,
    ) -> RegisterOutcome {
        match backend.register(request).await {
            Ok(resp) if resp.success => RegisterOutcome::Success,
            Ok(resp) => RegisterOutcome::Failure {
                message: resp
                    .message
                    .unwrap_or_else(|| REGISTER_FAILED_MESSAGE.to_string()),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                RegisterOutcome::Failure {
                    message: e
                        .server_message()
                        .unwrap_or(REGISTER_FAILED_MESSAGE)
                        .to_string(),
                }
            }
        }
    }

    /// Replace the signed-in user (profile edits) and re-persist it.
    pub fn update_user(&self, user: User) -> Result<(), SessionError> {
        if self.current_user().is_none() {
            return Err(SessionError::NotSignedIn);
        }
        let raw = serde_json::to_string(&user)?;
        self.storage.set(USER_KEY, &raw)?;
        self.set_state(SessionState::Authenticated(user));
        Ok(())
    }

    /// Clear storage and state. Does not navigate.
    pub fn logout(&self) {
        if let Err(e) = self.clear_storage() {
            tracing::error!(error = %e, "Failed to clear session storage");
        }
        self.set_state(SessionState::Unauthenticated);
        tracing::info!("Signed out");
    }

    /// Token rejected by the server: sign out and force the login screen.
    pub fn expire(&self) {
        tracing::warn!("Session expired, redirecting to login");
        self.logout();
        self.navigator.replace(LOGIN_PATH);
    }

    fn clear_storage(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    fn set_state(&self, next: SessionState) {
        match self.state.write() {
            Ok(mut state) => *state = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
