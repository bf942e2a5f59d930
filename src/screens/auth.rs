//! Login and self-registration screens.

use std::sync::Arc;

use super::patients::{is_email, INVALID_EMAIL};
use super::require;
use crate::config::{DASHBOARD_PATH, LOGIN_PATH};
use crate::core_state::CoreState;
use crate::messages;
use crate::models::{RegisterRequest, Role, User};
use crate::router::Resolution;
use crate::session::{LoginOutcome, RegisterOutcome};

/// Seeded accounts offered as one-click fills on the login page.
pub const DEMO_ACCOUNTS: &[(Role, &str, &str)] = &[
    (Role::Admin, "admin@hivcare.com", "admin123"),
    (Role::Doctor, "dr.nguyen@hivcare.com", "doctor123"),
    (Role::Patient, "patient1@email.com", "patient123"),
];

// ═══════════════════════════════════════════════════════════
// Login
// ═══════════════════════════════════════════════════════════

pub struct LoginScreen {
    core: Arc<CoreState>,
    pub email: String,
    pub password: String,
    loading: bool,
}

impl LoginScreen {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            email: String::new(),
            password: String::new(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fill the form with a demo account. Does not submit.
    pub fn fill_demo(&mut self, role: Role) {
        if let Some((_, email, password)) = DEMO_ACCOUNTS.iter().find(|(r, _, _)| *r == role) {
            self.email = email.to_string();
            self.password = password.to_string();
        }
    }

    /// Sign in and land on the dashboard. The password is cleared on
    /// failure; the email stays.
    pub async fn submit(&mut self) -> Option<User> {
        self.loading = true;
        let outcome = self
            .core
            .session()
            .login(self.core.api(), self.email.trim(), &self.password)
            .await;
        self.loading = false;

        match outcome {
            LoginOutcome::Success(user) => {
                self.core.notifier().success(messages::LOGIN_SUCCESS);
                self.password.clear();
                self.core.navigate(DASHBOARD_PATH);
                Some(user)
            }
            LoginOutcome::Failure { message } => {
                self.core.notifier().error(&message);
                self.password.clear();
                None
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Register
// ═══════════════════════════════════════════════════════════

pub struct RegisterScreen {
    core: Arc<CoreState>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    loading: bool,
}

impl RegisterScreen {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Patient,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.username)?;
        require(&self.email)?;
        require(&self.password)?;
        if !is_email(self.email.trim()) {
            return Err(INVALID_EMAIL.to_string());
        }
        if self.password != self.confirm_password {
            return Err(messages::PASSWORD_MISMATCH.to_string());
        }
        Ok(())
    }

    /// Create the account, then send the visitor to the login page. The
    /// new account is not signed in.
    pub async fn submit(&mut self) -> bool {
        if let Err(message) = self.validate() {
            self.core.notifier().error(&message);
            return false;
        }
        let request = RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        };

        self.loading = true;
        let outcome = self
            .core
            .session()
            .register(self.core.api(), &request)
            .await;
        self.loading = false;

        match outcome {
            RegisterOutcome::Success => {
                self.core.notifier().success(messages::REGISTER_SUCCESS);
                matches!(self.core.navigate(LOGIN_PATH), Resolution::Render(_))
            }
            RegisterOutcome::Failure { message } => {
                self.core.notifier().error(&message);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TOKEN_KEY, USER_KEY};
    use crate::core_state::testing::fixture;
    use crate::router::Route;
    use crate::storage::DurableStorage;
    use serde_json::json;

    #[tokio::test]
    async fn admin_login_lands_on_dashboard_with_admin_menu() {
        let fx = fixture(None, true).await;
        fx.backend.accept_login(
            "a@x",
            "p",
            "tok-1",
            json!({"id": 1, "fullName": "Admin", "email": "a@x", "role": "ADMIN", "isActive": true}),
        );
        let mut screen = LoginScreen::new(fx.core.clone());
        screen.email = "a@x".into();
        screen.password = "p".into();

        let user = screen.submit().await.unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(fx.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert!(fx.storage.get(USER_KEY).unwrap().is_some());
        assert_eq!(fx.core.navigator().current(), "/dashboard");
        assert_eq!(fx.toasts.last().unwrap().message, messages::LOGIN_SUCCESS);

        let paths: Vec<String> = fx
            .core
            .sidebar
            .items(fx.core.current_user().as_ref())
            .iter()
            .map(|item| item.path())
            .collect();
        assert!(paths.contains(&"/admin/users".to_string()));
        assert!(paths.contains(&"/admin".to_string()));
    }

    #[tokio::test]
    async fn rejected_login_toasts_server_message() {
        let fx = fixture(None, true).await;
        let mut screen = LoginScreen::new(fx.core.clone());
        screen.email = "a@x".into();
        screen.password = "wrong".into();

        assert!(screen.submit().await.is_none());
        assert_eq!(
            fx.toasts.last().unwrap().message,
            "Email hoặc mật khẩu không đúng"
        );
        assert!(screen.password.is_empty());
        assert_eq!(screen.email, "a@x");
        assert_eq!(fx.storage.get(TOKEN_KEY).unwrap(), None);
        assert!(fx.core.current_user().is_none());
    }

    #[tokio::test]
    async fn demo_fill() {
        let fx = fixture(None, true).await;
        let mut screen = LoginScreen::new(fx.core.clone());
        screen.fill_demo(Role::Doctor);
        assert_eq!(screen.email, "dr.nguyen@hivcare.com");
        assert_eq!(screen.password, "doctor123");
    }

    fn filled(core: Arc<CoreState>) -> RegisterScreen {
        let mut screen = RegisterScreen::new(core);
        screen.username = "lan".into();
        screen.email = "lan@x.vn".into();
        screen.password = "secret".into();
        screen.confirm_password = "secret".into();
        screen
    }

    #[tokio::test]
    async fn register_mismatch_sends_nothing() {
        let fx = fixture(None, true).await;
        let mut screen = filled(fx.core.clone());
        screen.confirm_password = "other".into();

        assert!(!screen.submit().await);
        assert_eq!(fx.toasts.last().unwrap().message, messages::PASSWORD_MISMATCH);
        assert!(fx.backend.requests_to("auth").is_empty());
    }

    #[tokio::test]
    async fn register_success_goes_to_login() {
        let fx = fixture(None, true).await;
        fx.core.navigate("/register");
        let mut screen = filled(fx.core.clone());

        assert!(screen.submit().await);

        let sent = fx.backend.requests_to("auth/register");
        let body = sent[0].body.clone().unwrap();
        assert_eq!(body["role"], "PATIENT");
        assert_eq!(body["username"], "lan");
        assert_eq!(fx.toasts.last().unwrap().message, messages::REGISTER_SUCCESS);
        assert_eq!(fx.core.resolve_current(), Resolution::Render(Route::Login));
        assert!(fx.core.current_user().is_none());
    }
}
