//! Account settings: profile edits, password change and account deletion.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{UserInfo, UserRole};
use crate::shared::validation::registration::{CONFIRM_REQUIRED, PASSWORDS_MISMATCH};
use crate::shared::validation::rules::PasswordPolicy;
use crate::shared::validation::ValidationResult;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone regex"));

pub const MAX_BIO_CHARS: usize = 500;
pub const CURRENT_PASSWORD_REQUIRED: &str = "Current password is required";
pub const PASSWORD_UNCHANGED: &str = "New password must be different from current password";
pub const DELETE_PASSWORD_REQUIRED: &str = "Please enter your password to confirm";

/// `GET /auth/profile/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub learning_goals: Option<String>,
}

impl UserProfile {
    pub fn role(&self) -> UserRole {
        UserRole::from_user_type(self.user_type.as_deref())
    }

    /// The session-level view of this profile.
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            user_type: self.user_type.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Editable profile fields. Teacher and student extras are both carried;
/// only the ones for the account's role are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub phone_number: String,
    pub specialization: String,
    pub experience: String,
    pub qualifications: String,
    pub grade_level: String,
    pub school: String,
    pub learning_goals: String,
}

/// Body for `PATCH /auth/profile/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<String>,
}

impl ProfileUpdate {
    /// Text parts of the multipart body used when a new picture is attached.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("bio", self.bio.clone()),
            ("phone_number", self.phone_number.clone()),
        ];
        let extras = [
            ("specialization", &self.specialization),
            ("experience", &self.experience),
            ("qualifications", &self.qualifications),
            ("grade_level", &self.grade_level),
            ("school", &self.school),
            ("learning_goals", &self.learning_goals),
        ];
        fields.extend(
            extras
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|v| (name, v))),
        );
        fields
    }
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            first_name: text(&profile.first_name),
            last_name: text(&profile.last_name),
            bio: text(&profile.bio),
            phone_number: text(&profile.phone_number),
            specialization: text(&profile.specialization),
            experience: text(&profile.experience),
            qualifications: text(&profile.qualifications),
            grade_level: text(&profile.grade_level),
            school: text(&profile.school),
            learning_goals: text(&profile.learning_goals),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        let mut errors = BTreeMap::new();
        if self.bio.chars().count() > MAX_BIO_CHARS {
            errors.insert(
                "bio".to_string(),
                format!("Bio must be at most {} characters", MAX_BIO_CHARS),
            );
        }
        let phone = self.phone_number.trim();
        if !phone.is_empty() && !PHONE_RE.is_match(phone) {
            errors.insert(
                "phone_number".to_string(),
                "Enter a phone number of 9 to 15 digits, optionally starting with +".to_string(),
            );
        }
        ValidationResult::from_errors(errors)
    }

    pub fn to_update(&self, role: UserRole) -> Result<ProfileUpdate, ValidationResult> {
        let result = self.validate();
        if !result.is_valid {
            return Err(result);
        }
        let text = |v: &str| v.trim().to_string();
        let teacher = role == UserRole::Teacher;
        let student = role == UserRole::Student;
        let only = |keep: bool, v: &str| keep.then(|| text(v));
        Ok(ProfileUpdate {
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            bio: text(&self.bio),
            phone_number: text(&self.phone_number),
            specialization: only(teacher, &self.specialization),
            experience: only(teacher, &self.experience),
            qualifications: only(teacher, &self.qualifications),
            grade_level: only(student, &self.grade_level),
            school: only(student, &self.school),
            learning_goals: only(student, &self.learning_goals),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body for `POST /auth/change-password/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

pub fn validate_password_change(form: &PasswordChangeForm) -> ValidationResult {
    validate_password_change_with(form, &PasswordPolicy::DEFAULT)
}

pub fn validate_password_change_with(
    form: &PasswordChangeForm,
    policy: &PasswordPolicy,
) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if form.current_password.is_empty() {
        errors.insert("current_password".to_string(), CURRENT_PASSWORD_REQUIRED.to_string());
    }
    if let Some(message) = policy.check(&form.new_password) {
        errors.insert("new_password".to_string(), message);
    } else if form.new_password == form.current_password {
        errors.insert("new_password".to_string(), PASSWORD_UNCHANGED.to_string());
    }

    if form.confirm_password.is_empty() {
        errors.insert("confirm_password".to_string(), CONFIRM_REQUIRED.to_string());
    } else if !form.new_password.is_empty() && form.new_password != form.confirm_password {
        errors.insert("confirm_password".to_string(), PASSWORDS_MISMATCH.to_string());
    }

    ValidationResult::from_errors(errors)
}

impl PasswordChangeForm {
    pub fn to_request(&self) -> Result<PasswordChangeRequest, ValidationResult> {
        let result = validate_password_change(self);
        if !result.is_valid {
            return Err(result);
        }
        Ok(PasswordChangeRequest {
            old_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

/// Body for `DELETE /auth/account/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

impl DeleteAccountRequest {
    pub fn confirmed(password: &str) -> Result<Self, String> {
        if password.is_empty() {
            return Err(DELETE_PASSWORD_REQUIRED.to_string());
        }
        Ok(Self {
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(current: &str, new: &str, confirm: &str) -> PasswordChangeForm {
        PasswordChangeForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_profile_from_api_body() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 3,
            "email": "t@example.com",
            "first_name": "Grace",
            "user_type": "teacher",
            "bio": "",
            "specialization": "Compilers",
            "full_name": "Grace"
        }))
        .unwrap();
        assert_eq!(profile.role(), UserRole::Teacher);
        assert_eq!(profile.user_info().display_name(), "Grace");
        let form = ProfileForm::from_profile(&profile);
        assert_eq!(form.specialization, "Compilers");
        assert_eq!(form.school, "");
    }

    #[test]
    fn test_profile_update_sends_role_fields_only() {
        let form = ProfileForm {
            first_name: " Ada ".to_string(),
            specialization: "Math".to_string(),
            school: "Elsewhere".to_string(),
            ..ProfileForm::default()
        };
        let update = form.to_update(UserRole::Teacher).unwrap();
        assert_eq!(update.first_name, "Ada");
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["specialization"], "Math");
        assert!(body.get("school").is_none());

        let fields = update.form_fields();
        assert!(fields.contains(&("specialization", "Math".to_string())));
        assert!(!fields.iter().any(|(name, _)| *name == "school"));

        let student = form.to_update(UserRole::Student).unwrap();
        assert_eq!(student.school.as_deref(), Some("Elsewhere"));
        assert_eq!(student.specialization, None);
    }

    #[test]
    fn test_profile_field_checks() {
        let form = ProfileForm {
            bio: "b".repeat(MAX_BIO_CHARS + 1),
            phone_number: "12-34".to_string(),
            ..ProfileForm::default()
        };
        let result = form.validate();
        assert!(result.error("bio").is_some());
        assert!(result.error("phone_number").is_some());

        let ok = ProfileForm {
            phone_number: "+123456789".to_string(),
            ..ProfileForm::default()
        };
        assert!(ok.validate().is_valid);
    }

    #[test]
    fn test_password_change_uses_default_policy() {
        let result = validate_password_change(&change("Old-pass1", "weakpass", "weakpass"));
        assert_eq!(
            result.error("new_password"),
            PasswordPolicy::DEFAULT.check("weakpass").as_deref()
        );
        assert!(validate_password_change(&change("Old-pass1", "N3w-passw", "N3w-passw")).is_valid);
    }

    #[test]
    fn test_password_change_confirmation() {
        let result = validate_password_change(&change("Old-pass1", "N3w-passw", ""));
        assert_eq!(result.error("confirm_password"), Some(CONFIRM_REQUIRED));

        let result = validate_password_change(&change("Old-pass1", "N3w-passw", "N3w-passx"));
        assert_eq!(result.error("confirm_password"), Some(PASSWORDS_MISMATCH));
    }

    #[test]
    fn test_password_change_current_password() {
        let result = validate_password_change(&change("", "N3w-passw", "N3w-passw"));
        assert_eq!(result.error("current_password"), Some(CURRENT_PASSWORD_REQUIRED));

        let result = validate_password_change(&change("N3w-passw", "N3w-passw", "N3w-passw"));
        assert_eq!(result.error("new_password"), Some(PASSWORD_UNCHANGED));
    }

    #[test]
    fn test_password_change_request_body() {
        let request = change("Old-pass1", "N3w-passw", "N3w-passw").to_request().unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "old_password": "Old-pass1",
                "new_password": "N3w-passw",
                "confirm_password": "N3w-passw"
            })
        );
        assert!(change("", "", "").to_request().is_err());
    }

    #[test]
    fn test_delete_account_needs_password() {
        assert_eq!(
            DeleteAccountRequest::confirmed(""),
            Err(DELETE_PASSWORD_REQUIRED.to_string())
        );
        assert_eq!(
            DeleteAccountRequest::confirmed("secret").map(|r| r.password),
            Ok("secret".to_string())
        );
    }
}
