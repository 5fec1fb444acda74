//! Reusable field checks.

use once_cell::sync::Lazy;
use regex::Regex;

use super::form::{FieldRule, FieldRuleSet};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("email regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username regex"));

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// `None` when the email is acceptable.
pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some(EMAIL_REQUIRED.to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Some(EMAIL_INVALID.to_string());
    }
    None
}

/// Password strength policy. Checks run in a fixed order and the first
/// failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub needs_uppercase: bool,
    pub needs_digit: bool,
    pub needs_special: bool,
}

impl PasswordPolicy {
    /// The one policy used by login, registration and password change.
    pub const DEFAULT: Self = Self {
        min_length: 8,
        needs_uppercase: true,
        needs_digit: true,
        needs_special: true,
    };

    pub fn check(&self, password: &str) -> Option<String> {
        if password.is_empty() {
            return Some(PASSWORD_REQUIRED.to_string());
        }
        if password.chars().count() < self.min_length {
            return Some(format!(
                "Password must be at least {} characters long",
                self.min_length
            ));
        }
        if self.needs_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Some("Password must contain at least one uppercase letter".to_string());
        }
        if self.needs_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Some("Password must contain at least one number".to_string());
        }
        if self.needs_special && !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return Some("Password must contain at least one special character".to_string());
        }
        None
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn validate_password(password: &str) -> Option<String> {
    PasswordPolicy::DEFAULT.check(password)
}

/// 3+ characters of letters, digits and underscores.
pub fn validate_username(username: &str) -> Option<String> {
    if username.is_empty() {
        return Some("Username is required".to_string());
    }
    if username.chars().count() < 3 {
        return Some("Username must be at least 3 characters".to_string());
    }
    if !USERNAME_RE.is_match(username) {
        return Some("Username can only contain letters, numbers, and underscores".to_string());
    }
    None
}

pub fn email_rule() -> FieldRule {
    FieldRule::required(EMAIL_REQUIRED).with_check(validate_email)
}

pub fn password_rule() -> FieldRule {
    FieldRule::required(PASSWORD_REQUIRED).with_check(validate_password)
}

/// Login form: `email` and `password`.
pub fn login_rules() -> FieldRuleSet {
    FieldRuleSet::new()
        .field("email", email_rule())
        .field("password", password_rule())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(""), Some(EMAIL_REQUIRED.to_string()));
        assert_eq!(validate_email("user@example"), Some(EMAIL_INVALID.to_string()));
        assert_eq!(validate_email("user@example.c"), Some(EMAIL_INVALID.to_string()));
        assert_eq!(validate_email("user@example.comcomc"), Some(EMAIL_INVALID.to_string()));
        assert_eq!(validate_email("first.last@mail.example.org"), None);
        assert_eq!(validate_email("a_b-c@x.io"), None);
    }

    #[test]
    fn test_password_checks_in_order() {
        let policy = PasswordPolicy::DEFAULT;
        assert_eq!(policy.check(""), Some(PASSWORD_REQUIRED.to_string()));
        assert_eq!(
            policy.check("abc"),
            Some("Password must be at least 8 characters long".to_string())
        );
        assert_eq!(
            policy.check("abcdefgh"),
            Some("Password must contain at least one uppercase letter".to_string())
        );
        assert_eq!(
            policy.check("Abcdefgh"),
            Some("Password must contain at least one number".to_string())
        );
        assert_eq!(
            policy.check("Abcdefg1"),
            Some("Password must contain at least one special character".to_string())
        );
        assert_eq!(policy.check("Abcdef1!"), None);
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 6,
            needs_uppercase: false,
            needs_digit: false,
            needs_special: false,
        };
        assert_eq!(policy.check("simple"), None);
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(""), Some("Username is required".to_string()));
        assert_eq!(
            validate_username("ab"),
            Some("Username must be at least 3 characters".to_string())
        );
        assert!(validate_username("bad name").is_some());
        assert_eq!(validate_username("good_name1"), None);
    }

    #[test]
    fn test_login_rules() {
        let input: &[(&str, &str)] = &[("email", "nope"), ("password", "")];
        let result = crate::shared::validation::validate(input, &login_rules());
        assert_eq!(result.error("email"), Some(EMAIL_INVALID));
        assert_eq!(result.error("password"), Some(PASSWORD_REQUIRED));
    }
}
