//! The signed-in user's own profile: personal details and password.

use std::sync::Arc;

use super::patients::{is_email, INVALID_EMAIL};
use super::{report_failure, require};
use crate::core_state::CoreState;
use crate::messages;
use crate::models::{PasswordChange, PersonalInfo, User};
use crate::policy::{can, Action, Subject};

pub struct ProfileScreen {
    core: Arc<CoreState>,
    pub personal: PersonalInfo,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    saving: bool,
}

impl ProfileScreen {
    /// Personal fields start from the signed-in user.
    pub fn new(core: Arc<CoreState>) -> Self {
        let personal = core
            .current_user()
            .map(|u| PersonalInfo::from_user(&u))
            .unwrap_or_default();
        Self {
            core,
            personal,
            current_password: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
            saving: false,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn editable_user(&self) -> Option<User> {
        let user = self.core.current_user()?;
        if can(Some(&user), Action::Edit, Subject::Profile) && user.id.is_some() {
            Some(user)
        } else {
            None
        }
    }

    fn reject(&self, message: &str) -> bool {
        self.core.notifier().error(message);
        false
    }

    fn validate_personal(&self) -> Result<(), String> {
        require(&self.personal.full_name)?;
        require(&self.personal.email)?;
        if !is_email(&self.personal.email) {
            return Err(INVALID_EMAIL.to_string());
        }
        Ok(())
    }

    /// Send the personal fields, then refresh the session's user so the
    /// header shows the new name at once.
    pub async fn save_personal(&mut self) -> bool {
        let Some(user) = self.editable_user() else {
            return self.reject(messages::FORBIDDEN);
        };
        let Some(user_id) = user.id.clone() else {
            return self.reject(messages::FORBIDDEN);
        };
        if let Err(message) = self.validate_personal() {
            return self.reject(&message);
        }

        self.saving = true;
        let result = self
            .core
            .api()
            .profile()
            .update_personal(user.role, &user_id, &self.personal)
            .await;
        self.saving = false;

        match result {
            Ok(()) => {
                if let Err(e) = self.core.session().update_user(self.personal.apply_to(&user)) {
                    tracing::error!(error = %e, "Failed to store updated user");
                }
                self.core.notifier().success(messages::PROFILE_UPDATED);
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::PROFILE_UPDATE_FAILED);
                false
            }
        }
    }

    /// Change the password. A mismatched confirmation sends nothing; the
    /// three fields are cleared after a successful change.
    pub async fn change_password(&mut self) -> bool {
        let Some(user_id) = self.editable_user().and_then(|u| u.id) else {
            return self.reject(messages::FORBIDDEN);
        };
        if let Err(message) = require(&self.current_password).and(require(&self.new_password)) {
            return self.reject(&message);
        }
        if self.new_password != self.confirm_password {
            return self.reject(messages::PASSWORD_MISMATCH);
        }

        let change = PasswordChange {
            current_password: &self.current_password,
            new_password: &self.new_password,
        };
        self.saving = true;
        let result = self
            .core
            .api()
            .profile()
            .change_password(&user_id, &change)
            .await;
        self.saving = false;

        match result {
            Ok(()) => {
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
                self.core.notifier().success(messages::PASSWORD_CHANGED);
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::PASSWORD_CHANGE_FAILED);
                false
            }
        }
    }
}
