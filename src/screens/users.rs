//! Account administration under `/admin/users`.

use super::patients::{is_email, INVALID_EMAIL};
use super::{report_failure, require, text_matches, FormError, ResourceFamily, ResourceList};
use crate::messages::{self, FamilyMessages};
use crate::models::{EntityId, Role, User};
use crate::policy::{Action, Subject};

pub struct UsersFamily;

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
}

impl ResourceFamily for UsersFamily {
    type Item = User;
    type Filter = UserFilter;

    const SUBJECT: Subject = Subject::Users;
    const MESSAGES: FamilyMessages = messages::USERS;

    fn matches(item: &User, search: &str, filter: &UserFilter) -> bool {
        filter.role.map_or(true, |r| r == item.role)
            && text_matches(
                search,
                &[
                    item.full_name.as_deref(),
                    item.username.as_deref(),
                    item.email.as_deref(),
                ],
            )
    }

    fn draft(_user: Option<&User>) -> User {
        User::blank(Role::Patient)
    }

    fn validate(draft: &User) -> Result<(), String> {
        require(draft.full_name.as_deref().unwrap_or(""))?;
        let email = draft.email.as_deref().unwrap_or("");
        require(email)?;
        if !is_email(email) {
            return Err(INVALID_EMAIL.to_string());
        }
        Ok(())
    }

    /// A blank password on edit means "unchanged" and is not sent.
    fn prepare(draft: &User, _user: Option<&User>) -> User {
        let mut payload = draft.clone();
        if payload.password.as_deref().is_some_and(|p| p.is_empty()) {
            payload.password = None;
        }
        payload
    }
}

impl ResourceList<UsersFamily> {
    /// Submit the open user form. A new account needs a password, and a
    /// typed password must match its confirmation.
    pub async fn submit_user(&mut self, confirm_password: &str) -> Result<User, FormError> {
        let form = self.form().ok_or(FormError::NotOpen)?;
        let password = form.draft.password.as_deref().unwrap_or("");
        let check = if !form.is_edit() && password.is_empty() {
            Err(messages::REQUIRED_FIELD)
        } else if password != confirm_password {
            Err(messages::PASSWORD_MISMATCH)
        } else {
            Ok(())
        };
        if let Err(message) = check {
            self.core().notifier().error(message);
            return Err(FormError::Validation(message.to_string()));
        }
        self.submit_form().await
    }

    /// Confirm, then ask the backend to reset the account's password.
    pub async fn reset_password(&self, id: &EntityId) -> bool {
        if !self.allows(Action::ResetPassword) {
            self.core().notifier().error(messages::FORBIDDEN);
            return false;
        }
        let core = self.core();
        if !core.confirmer().confirm(messages::CONFIRM_RESET_PASSWORD) {
            return false;
        }
        match core.api().admin().reset_password(id).await {
            Ok(()) => {
                core.notifier().success(messages::PASSWORD_RESET);
                true
            }
            Err(e) => {
                report_failure(core, &e, messages::PASSWORD_RESET_FAILED);
                false
            }
        }
    }
}
