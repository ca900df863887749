//! Account settings page.
//!
//! Holds the local state of the three "change" forms (name, email and
//! password) and sends the updates to the API. Every form stays closed until
//! the user asks to change the matching field.

use log::{debug, info, warn};
use serde_json::json;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::components::custom_head::CustomHead;
use crate::models::{SettingsField, User};
use crate::types::Validation;
use crate::utils::custom_validator::{CustomValidator, FieldError};
use crate::utils::input_validation::{require_password, EmailAddress, PasswordChange};

pub const PAGE_TITLE: &str = "Settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("An update is already in progress")]
    Busy,

    #[error("{0} is not being edited")]
    NotEditing(SettingsField),
}

/// Which edit forms are open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldChangeState {
    pub name: bool,
    pub email: bool,
    pub password: bool,
}

impl FieldChangeState {
    pub fn is_open(&self, field: SettingsField) -> bool {
        match field {
            SettingsField::Name => self.name,
            SettingsField::Email => self.email,
            SettingsField::Password => self.password,
        }
    }

    fn set(&mut self, field: SettingsField, open: bool) {
        match field {
            SettingsField::Name => self.name = open,
            SettingsField::Email => self.email = open,
            SettingsField::Password => self.password = open,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNameForm {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmailForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePasswordForm {
    pub password: String,
    pub password_confirm: String,
    pub current_password: String,
}

/// Raises the loading flag for as long as it lives, so a request future that
/// is dropped before completing still lowers it
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct SettingsPage<A: ApiClient> {
    api: A,
    user: Option<User>,
    loading: bool,
    changes: FieldChangeState,
    name_form: UpdateNameForm,
    email_form: UpdateEmailForm,
    password_form: UpdatePasswordForm,
}

impl<A: ApiClient> SettingsPage<A> {
    pub fn new(api: A, user: Option<User>) -> Self {
        Self {
            api,
            user,
            loading: false,
            changes: FieldChangeState::default(),
            name_form: UpdateNameForm::default(),
            email_form: UpdateEmailForm::default(),
            password_form: UpdatePasswordForm::default(),
        }
    }

    pub fn head(&self) -> CustomHead {
        CustomHead::new(PAGE_TITLE)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn changes(&self) -> FieldChangeState {
        self.changes
    }

    pub fn name_form(&self) -> &UpdateNameForm {
        &self.name_form
    }

    pub fn email_form(&self) -> &UpdateEmailForm {
        &self.email_form
    }

    pub fn password_form(&self) -> &UpdatePasswordForm {
        &self.password_form
    }

    /// Opens the edit form of a field
    pub fn open_change(&mut self, field: SettingsField) {
        self.changes.set(field, true);
    }

    /// Closes the edit form of a field and forgets what was typed in it
    pub fn cancel_change(&mut self, field: SettingsField) {
        self.changes.set(field, false);
        self.reset_form(field);
    }

    fn reset_form(&mut self, field: SettingsField) {
        match field {
            SettingsField::Name => self.name_form = UpdateNameForm::default(),
            SettingsField::Email => self.email_form = UpdateEmailForm::default(),
            SettingsField::Password => self.password_form = UpdatePasswordForm::default(),
        }
    }

    // Input handlers, each returning the feedback for the edited field

    pub fn set_name(&mut self, name: &str) -> Validation {
        self.name_form.name = name.to_owned();
        CustomValidator::first_name(name).into()
    }

    pub fn set_email(&mut self, email: &str) -> Validation {
        self.email_form.email = email.to_owned();
        CustomValidator::email(email).into()
    }

    pub fn set_email_password(&mut self, password: &str) -> Validation {
        self.email_form.password = password.to_owned();
        require_password(password).into()
    }

    pub fn set_password(&mut self, password: &str) -> Validation {
        self.password_form.password = password.to_owned();
        CustomValidator::password(password).into()
    }

    pub fn set_password_confirm(&mut self, confirm: &str) -> Validation {
        self.password_form.password_confirm = confirm.to_owned();
        CustomValidator::confirm_password(&self.password_form.password, confirm).into()
    }

    pub fn set_current_password(&mut self, password: &str) -> Validation {
        self.password_form.current_password = password.to_owned();
        require_password(password).into()
    }

    fn check_submittable(&self, field: SettingsField) -> Result<(), SettingsError> {
        if self.loading {
            return Err(SettingsError::Busy);
        }
        if !self.changes.is_open(field) {
            return Err(SettingsError::NotEditing(field));
        }
        Ok(())
    }

    /// Sends a request with the loading flag raised, lowering it whatever the
    /// outcome
    async fn send_patch(&mut self, path: &str, body: serde_json::Value) -> Result<(), SettingsError> {
        let loading = LoadingGuard::raise(&mut self.loading);
        let result = self.api.patch(path, body).await;
        drop(loading);

        if let Err(e) = &result {
            warn!("PATCH {} failed: {}", path, e);
        }
        Ok(result?)
    }

    fn finish_change(&mut self, field: SettingsField) {
        self.changes.set(field, false);
        self.reset_form(field);
    }

    pub async fn submit_name(&mut self) -> Result<(), SettingsError> {
        self.check_submittable(SettingsField::Name)?;

        let name = self.name_form.name.clone();
        if let Err(e) = CustomValidator::first_name(&name) {
            debug!("Name change rejected: {}", e);
            return Err(e.into());
        }

        self.send_patch("/users/name", json!({ "name": name })).await?;

        info!("Account name updated");
        if let Some(user) = self.user.as_mut() {
            user.name = name;
        }
        self.finish_change(SettingsField::Name);
        Ok(())
    }

    pub async fn submit_email(&mut self) -> Result<(), SettingsError> {
        self.check_submittable(SettingsField::Email)?;

        let validated = EmailAddress::try_from(self.email_form.email.as_str())
            .and_then(|email| require_password(&self.email_form.password).map(|_| email));
        let email = match validated {
            Ok(email) => email,
            Err(e) => {
                debug!("Email change rejected: {}", e);
                return Err(e.into());
            }
        };

        let body = json!({
            "email": email.as_ref(),
            "password": self.email_form.password,
        });
        self.send_patch("/users/email", body).await?;

        info!("Account email updated to {}", email);
        if let Some(user) = self.user.as_mut() {
            user.email = email.to_string();
        }
        self.finish_change(SettingsField::Email);
        Ok(())
    }

    pub async fn submit_password(&mut self) -> Result<(), SettingsError> {
        self.check_submittable(SettingsField::Password)?;

        let form = &self.password_form;
        let change = match PasswordChange::new(&form.password, &form.password_confirm, &form.current_password) {
            Ok(change) => change,
            Err(e) => {
                debug!("Password change rejected: {}", e);
                return Err(e.into());
            }
        };

        let body = json!({
            "password": change.password.as_ref(),
            "currentPassword": change.current_password,
        });
        self.send_patch("/users/password", body).await?;

        info!("Account password updated");
        self.finish_change(SettingsField::Password);
        Ok(())
    }

    /// Permanently deletes the account with all its todos and lists
    pub async fn delete_account(&mut self) -> Result<(), SettingsError> {
        if self.loading {
            return Err(SettingsError::Busy);
        }

        let loading = LoadingGuard::raise(&mut self.loading);
        let result = self.api.delete("/users").await;
        drop(loading);

        if let Err(e) = result {
            warn!("Account deletion failed: {}", e);
            return Err(e.into());
        }

        info!("Account deleted");
        self.user = None;
        self.changes = FieldChangeState::default();
        for field in SettingsField::iter() {
            self.reset_form(field);
        }
        Ok(())
    }
}
