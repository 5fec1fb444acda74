pub mod guard;
pub mod profile;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::shared::validation::registration::RegistrationForm;

/// Account kind as the API reports it in `user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    None,
}

impl UserRole {
    /// Unknown or missing account kinds map to `None`.
    pub fn from_user_type(user_type: Option<&str>) -> Self {
        match user_type.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("student") => UserRole::Student,
            Some(t) if t.eq_ignore_ascii_case("teacher") => UserRole::Teacher,
            _ => UserRole::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Student => "Student",
            UserRole::Teacher => "Teacher",
            UserRole::None => "Guest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
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
}

impl UserInfo {
    pub fn role(&self) -> UserRole {
        UserRole::from_user_type(self.user_type.as_deref())
    }

    /// "First Last", falling back to the username and then the email.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Body returned by both login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserRole,
    pub bio: String,
    pub phone_number: String,
}

impl RegisterRequest {
    /// First word of the name becomes `first_name`, the rest `last_name`.
    pub fn from_form(form: &RegistrationForm) -> Self {
        let mut parts = form.name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        Self {
            email: form.email.trim().to_string(),
            username: form.username.trim().to_string(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
            first_name,
            last_name,
            user_type: form.role.unwrap_or(UserRole::Student),
            bio: String::new(),
            phone_number: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_role_from_user_type() {
        assert_eq!(UserRole::from_user_type(Some("teacher")), UserRole::Teacher);
        assert_eq!(UserRole::from_user_type(Some("Student")), UserRole::Student);
        assert_eq!(UserRole::from_user_type(Some("admin")), UserRole::None);
        assert_eq!(UserRole::from_user_type(None), UserRole::None);
    }

    #[test]
    fn test_user_info_deserialize_and_display_name() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": 7,
            "email": "t@example.com",
            "username": "teach",
            "first_name": "Grace",
            "last_name": "Hopper",
            "user_type": "teacher"
        }))
        .unwrap();
        assert_eq!(user.role(), UserRole::Teacher);
        assert_eq!(user.display_name(), "Grace Hopper");

        let bare: UserInfo = serde_json::from_value(json!({"id": 1, "email": "s@example.com"})).unwrap();
        assert_eq!(bare.role(), UserRole::None);
        assert_eq!(bare.display_name(), "s@example.com");
    }

    #[test]
    fn test_register_request_splits_name() {
        let form = RegistrationForm {
            name: "Ada  King Lovelace".to_string(),
            role: Some(UserRole::Teacher),
            ..RegistrationForm::default()
        };
        let request = RegisterRequest::from_form(&form);
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.last_name, "King Lovelace");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["user_type"], "teacher");
    }
}
