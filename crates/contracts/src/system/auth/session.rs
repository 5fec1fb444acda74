//! Client session state.
//!
//! One `Session` value lives in the auth context for the lifetime of the app.
//! It is replaced wholesale on restore, login, refresh and logout; everything
//! else only reads it. A session without a user is never authenticated.

use super::{UserInfo, UserRole};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<UserInfo>,
    is_loading: bool,
}

impl Session {
    /// Boot state: stored tokens are still being checked.
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_loading: false,
        }
    }

    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }

    /// Same user, marked busy while a login/logout round trip is in flight.
    pub fn busy(&self) -> Self {
        Self {
            user: self.user.clone(),
            is_loading: true,
        }
    }

    /// Same user, no longer busy.
    pub fn settled(&self) -> Self {
        Self {
            user: self.user.clone(),
            is_loading: false,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn role(&self) -> UserRole {
        self.user.as_ref().map(UserInfo::role).unwrap_or(UserRole::None)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role() == UserRole::Student
    }
}

#[cfg(test)]
pub(crate) fn test_user(user_type: &str) -> UserInfo {
    UserInfo {
        id: 1,
        email: "user@example.com".to_string(),
        username: Some("user".to_string()),
        first_name: None,
        last_name: None,
        user_type: Some(user_type.to_string()),
        profile_picture: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let boot = Session::loading();
        assert!(boot.is_loading());
        assert!(!boot.is_authenticated());

        let signed_in = Session::signed_in(test_user("teacher"));
        assert!(signed_in.is_authenticated());
        assert!(signed_in.is_teacher());
        assert!(!signed_in.is_student());

        let busy = signed_in.busy();
        assert!(busy.is_loading());
        assert_eq!(busy.user(), signed_in.user());
        assert_eq!(busy.settled(), signed_in);

        let out = Session::anonymous();
        assert!(out.user().is_none());
        assert_eq!(out.role(), UserRole::None);
    }
}
