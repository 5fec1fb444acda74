//! Sign-up form validation.
//!
//! Kept apart from the generic engine: it needs the cross-field
//! password confirmation and the role choice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::form::ValidationResult;
use super::rules::{validate_email, validate_username, PasswordPolicy};
use crate::system::auth::UserRole;

pub const CONFIRM_REQUIRED: &str = "Please confirm your password";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";
pub const ROLE_REQUIRED: &str = "Please select a role";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<UserRole>,
    pub remember_me: bool,
}

impl RegistrationForm {
    /// Field names in display order.
    pub const FIELDS: [&'static str; 6] = [
        "name",
        "username",
        "email",
        "password",
        "confirm_password",
        "role",
    ];
}

pub fn validate_registration(form: &RegistrationForm) -> ValidationResult {
    validate_registration_with(form, &PasswordPolicy::DEFAULT)
}

pub fn validate_registration_with(
    form: &RegistrationForm,
    policy: &PasswordPolicy,
) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if form.name.trim().is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }
    if let Some(message) = validate_username(&form.username) {
        errors.insert("username".to_string(), message);
    }
    if let Some(message) = validate_email(&form.email) {
        errors.insert("email".to_string(), message);
    }
    if let Some(message) = policy.check(&form.password) {
        errors.insert("password".to_string(), message);
    }

    if form.confirm_password.is_empty() {
        errors.insert("confirm_password".to_string(), CONFIRM_REQUIRED.to_string());
    } else if !form.password.is_empty() && form.password != form.confirm_password {
        errors.insert("confirm_password".to_string(), PASSWORDS_MISMATCH.to_string());
    }

    if !matches!(form.role, Some(UserRole::Student) | Some(UserRole::Teacher)) {
        errors.insert("role".to_string(), ROLE_REQUIRED.to_string());
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        RegistrationForm {
            name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "Analyt1cal!".to_string(),
            confirm_password: "Analyt1cal!".to_string(),
            role: Some(UserRole::Student),
            remember_me: false,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&filled()).is_valid);
    }

    #[test]
    fn test_mismatch_is_distinct_from_missing() {
        let mut form = filled();
        form.confirm_password = "Analyt1cal?".to_string();
        let result = validate_registration(&form);
        assert_eq!(result.error("confirm_password"), Some(PASSWORDS_MISMATCH));

        form.confirm_password.clear();
        let result = validate_registration(&form);
        assert_eq!(result.error("confirm_password"), Some(CONFIRM_REQUIRED));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let result = validate_registration(&RegistrationForm::default());
        for field in RegistrationForm::FIELDS {
            assert!(result.error(field).is_some(), "missing error for {}", field);
        }
    }

    #[test]
    fn test_role_none_is_rejected() {
        let mut form = filled();
        form.role = Some(UserRole::None);
        assert_eq!(validate_registration(&form).error("role"), Some(ROLE_REQUIRED));
    }

    #[test]
    fn test_weak_password_reports_first_failure() {
        let mut form = filled();
        form.password = "lowercase1!".to_string();
        form.confirm_password = form.password.clone();
        assert_eq!(
            validate_registration(&form).error("password"),
            Some("Password must contain at least one uppercase letter")
        );
    }
}
