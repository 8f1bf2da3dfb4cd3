//! Registration form: validation rules and the submit flow.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthProvider, AuthUser, MIN_PASSWORD_LEN};
use crate::routes::Route;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Values submitted from the registration page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword", alias = "confirm_password")]
    pub confirm_password: String,
}

/// Form field identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    /// HTML `name` attribute for the field.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
        }
    }
}

/// First failing rule per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, &'static str>,
}

impl FieldErrors {
    /// Whether every rule passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if it failed a rule.
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Failures in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.errors.entry(field).or_insert(message);
    }
}

impl RegisterForm {
    /// Checks every rule without contacting the provider.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !is_valid_email(email) {
            errors.insert(FormField::Email, "Email is not valid");
        }

        if self.password.is_empty() {
            errors.insert(FormField::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                FormField::Password,
                "Password should be at least 6 characters",
            );
        }

        if self.confirm_password != self.password {
            errors.insert(FormField::ConfirmPassword, "Passwords do not match");
        }

        errors
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Alert severity, mirrors the banner styles on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Request failed
    Error,
    /// Neutral notice
    Info,
}

/// Banner shown above the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Text shown verbatim
    pub message: String,
    /// Banner style
    pub severity: AlertSeverity,
}

impl Alert {
    /// Error banner with `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: AlertSeverity::Error,
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Form shown and editable.
    Editing,
    /// Request in flight; the page shows a loading indicator instead of the form.
    Submitting,
    /// Provider rejected the request; form shown again with an alert.
    Failed,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Rules failed; nothing was sent to the provider.
    Invalid(FieldErrors),
    /// Account created; navigate to `redirect`.
    Registered { user: AuthUser, redirect: Route },
    /// Provider refused the account.
    Rejected(Alert),
}

/// Registration page state across submit attempts.
#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    phase: FormPhase,
    values: RegisterForm,
    errors: FieldErrors,
    alert: Option<Alert>,
}

impl RegistrationFlow {
    /// Empty form, ready for editing.
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Editing,
            values: RegisterForm::default(),
            errors: FieldErrors::default(),
            alert: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Values to redisplay in the form.
    pub fn values(&self) -> &RegisterForm {
        &self.values
    }

    /// Field errors from the last submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Provider message from the last rejected submit.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Whether the loading indicator replaces the form.
    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Hides the alert banner.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validates `form` and, if it passes, asks `provider` to create the account.
    pub async fn submit(
        &mut self,
        form: RegisterForm,
        provider: &dyn AuthProvider,
    ) -> RegistrationOutcome {
        let errors = form.validate();
        self.values = form;
        if !errors.is_empty() {
            tracing::debug!(fields = errors.errors.len(), "Registration form invalid");
            self.phase = FormPhase::Editing;
            self.errors = errors.clone();
            return RegistrationOutcome::Invalid(errors);
        }

        self.errors = FieldErrors::default();
        self.alert = None;
        self.phase = FormPhase::Submitting;

        match provider
            .create_account(self.values.email.trim(), &self.values.password)
            .await
        {
            Ok(user) => {
                tracing::info!(uid = %user.uid, "Registration completed");
                self.phase = FormPhase::Editing;
                self.values = RegisterForm::default();
                RegistrationOutcome::Registered {
                    user,
                    redirect: Route::Login,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration rejected by provider");
                let alert = Alert::error(e.to_string());
                self.phase = FormPhase::Failed;
                self.alert = Some(alert.clone());
                RegistrationOutcome::Rejected(alert)
            }
        }
    }
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::auth::InMemoryAuthProvider;

    fn form(email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(form("a@b.co", "secret1", "secret1").validate().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = form("", "", "").validate();
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert_eq!(errors.get(FormField::Password), Some("Password is required"));
        assert_eq!(errors.get(FormField::ConfirmPassword), None);
    }

    #[test]
    fn test_email_format() {
        for bad in ["plain", "a@b", "a b@c.de", "@c.de"] {
            let errors = form(bad, "secret1", "secret1").validate();
            assert_eq!(
                errors.get(FormField::Email),
                Some("Email is not valid"),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_short_password_and_mismatch() {
        let errors = form("a@b.co", "12345", "54321").validate();
        assert_eq!(
            errors.get(FormField::Password),
            Some("Password should be at least 6 characters")
        );
        assert_eq!(
            errors.get(FormField::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    proptest! {
        #[test]
        fn test_short_password_always_flagged(password in "[a-z0-9]{1,5}") {
            let errors = form("a@b.co", &password, &password).validate();
            prop_assert_eq!(
                errors.get(FormField::Password),
                Some("Password should be at least 6 characters")
            );
            prop_assert!(errors.get(FormField::ConfirmPassword).is_none());
        }

        #[test]
        fn test_mismatched_confirmation_always_flagged(
            password in "[a-z0-9]{6,16}",
            suffix in "[a-z0-9]{1,4}",
        ) {
            let confirm = format!("{password}{suffix}");
            let errors = form("a@b.co", &password, &confirm).validate();
            prop_assert_eq!(
                errors.get(FormField::ConfirmPassword),
                Some("Passwords do not match")
            );
            prop_assert!(errors.get(FormField::Password).is_none());
        }
    }

    #[tokio::test]
    async fn test_mismatch_never_reaches_provider() {
        let provider = InMemoryAuthProvider::new();
        let mut flow = RegistrationFlow::new();

        let outcome = flow
            .submit(form("a@b.co", "secret1", "secret2"), &provider)
            .await;

        assert!(matches!(outcome, RegistrationOutcome::Invalid(_)));
        assert_eq!(provider.account_count(), 0);
        assert_eq!(flow.values().email, "a@b.co");
        assert_eq!(flow.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_success_redirects_to_login() {
        let provider = InMemoryAuthProvider::new();
        let mut flow = RegistrationFlow::new();

        let outcome = flow
            .submit(form("a@b.co", "secret1", "secret1"), &provider)
            .await;

        match outcome {
            RegistrationOutcome::Registered { user, redirect } => {
                assert_eq!(user.email, "a@b.co");
                assert_eq!(redirect, Route::Login);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(flow.values(), &RegisterForm::default());
    }

    #[tokio::test]
    async fn test_duplicate_surfaces_provider_message() {
        let provider = InMemoryAuthProvider::new();
        let mut flow = RegistrationFlow::new();
        flow.submit(form("a@b.co", "secret1", "secret1"), &provider)
            .await;

        let outcome = flow
            .submit(form("a@b.co", "secret1", "secret1"), &provider)
            .await;

        assert_eq!(
            outcome,
            RegistrationOutcome::Rejected(Alert::error(
                "The email address is already in use by another account."
            ))
        );
        assert_eq!(flow.phase(), FormPhase::Failed);
        assert!(flow.alert().is_some());
        assert_eq!(flow.values().email, "a@b.co");

        flow.dismiss_alert();
        assert!(flow.alert().is_none());
    }
}
