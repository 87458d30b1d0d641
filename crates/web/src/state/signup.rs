// =============================================================================
// Storedesk Web - Sign-up & Password Reset Wizards
// =============================================================================
// Both flows collect their fields over two steps and submit once.
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;
use serde::Serialize;

use crate::api::user::{self, PasswordUpdateRequest};
use crate::api::{ApiError, Gateway, Outcome};

/// Fields collected by the sign-up wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub business_number: String,
    pub phone_number: String,
    pub ssn: String,
}

#[derive(Clone, Copy)]
pub struct SignupStore {
    pub form: RwSignal<SignupForm>,
    gateway: StoredValue<Arc<Gateway>>,
}

impl SignupStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            form: RwSignal::new(SignupForm::default()),
            gateway: StoredValue::new(gateway),
        }
    }

    /// Account credentials.
    pub fn set_step1(&self, name: String, email: String, password: String) {
        self.form.update(|f| {
            f.name = name;
            f.email = email;
            f.password = password;
        });
    }

    /// Business and identity details.
    pub fn set_step2(&self, business_number: String, phone_number: String, ssn: String) {
        self.form.update(|f| {
            f.business_number = business_number;
            f.phone_number = phone_number;
            f.ssn = ssn;
        });
    }

    /// Submit both steps. The form is reset after a successful sign-up.
    pub async fn submit(&self) -> Outcome {
        let gateway = self.gateway.get_value();
        let form = self.form.get_untracked();
        let outcome = user::sign_up(&gateway.user, &form).await;
        if outcome.is_success() {
            self.form.set(SignupForm::default());
        }
        outcome
    }
}

/// Fields collected by the password reset wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordResetForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Copy)]
pub struct PasswordResetStore {
    pub form: RwSignal<PasswordResetForm>,
    gateway: StoredValue<Arc<Gateway>>,
}

impl PasswordResetStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            form: RwSignal::new(PasswordResetForm::default()),
            gateway: StoredValue::new(gateway),
        }
    }

    pub fn set_step1(&self, email: String) {
        self.form.update(|f| f.email = email);
    }

    pub fn set_step2(&self, password: String) {
        self.form.update(|f| f.password = password);
    }

    /// Mail a reset code to the address from step 1.
    pub async fn send_code(&self) -> Result<bool, ApiError> {
        let gateway = self.gateway.get_value();
        let email = self.form.with_untracked(|f| f.email.clone());
        user::email_send_if_pw_find(&gateway.user, &email).await
    }

    /// Store the new password from step 2.
    pub async fn submit(&self) -> bool {
        let gateway = self.gateway.get_value();
        let request = self.form.with_untracked(|f| PasswordUpdateRequest {
            email: f.email.clone(),
            password: f.password.clone(),
        });
        user::update_password(&gateway.user, &request).await
    }
}
