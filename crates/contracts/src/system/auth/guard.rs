//! Route access decisions.
//!
//! The decision is recomputed from the current [`Session`] on every render.
//! While the session is loading nothing redirects, so a signed-in user is
//! never bounced to the landing page during token restore.

use super::session::Session;
use super::UserRole;

/// Where a denied visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Public landing page, for visitors without a session.
    Landing,
    /// Dashboard home, for signed-in users lacking the route's role.
    Dashboard,
}

impl RedirectTarget {
    pub const fn path(self) -> &'static str {
        match self {
            RedirectTarget::Landing => "/",
            RedirectTarget::Dashboard => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Checking,
    Denied(RedirectTarget),
    Allowed,
}

/// Decide whether a protected view may render. An empty `required_roles`
/// admits any signed-in user.
pub fn decide(session: &Session, required_roles: &[UserRole]) -> AccessDecision {
    if session.is_loading() {
        return AccessDecision::Checking;
    }
    if !session.is_authenticated() {
        return AccessDecision::Denied(RedirectTarget::Landing);
    }
    if !required_roles.is_empty() && !required_roles.contains(&session.role()) {
        return AccessDecision::Denied(RedirectTarget::Dashboard);
    }
    AccessDecision::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::session::test_user;

    #[test]
    fn test_loading_is_checking_regardless_of_user() {
        assert_eq!(decide(&Session::loading(), &[]), AccessDecision::Checking);
        let busy = Session::signed_in(test_user("student")).busy();
        assert_eq!(decide(&busy, &[UserRole::Teacher]), AccessDecision::Checking);
    }

    #[test]
    fn test_anonymous_goes_to_landing() {
        assert_eq!(
            decide(&Session::anonymous(), &[]),
            AccessDecision::Denied(RedirectTarget::Landing)
        );
        assert_eq!(RedirectTarget::Landing.path(), "/");
    }

    #[test]
    fn test_wrong_role_goes_to_dashboard() {
        let student = Session::signed_in(test_user("student"));
        assert_eq!(
            decide(&student, &[UserRole::Teacher]),
            AccessDecision::Denied(RedirectTarget::Dashboard)
        );
        assert_eq!(RedirectTarget::Dashboard.path(), "/dashboard");
    }

    #[test]
    fn test_allowed() {
        let teacher = Session::signed_in(test_user("teacher"));
        assert_eq!(decide(&teacher, &[UserRole::Teacher]), AccessDecision::Allowed);
        assert_eq!(decide(&teacher, &[]), AccessDecision::Allowed);
        assert_eq!(
            decide(&teacher, &[UserRole::Student, UserRole::Teacher]),
            AccessDecision::Allowed
        );
    }

    #[test]
    fn test_unknown_role_is_denied_on_role_routes() {
        let other = Session::signed_in(test_user("admin"));
        assert_eq!(decide(&other, &[]), AccessDecision::Allowed);
        assert_eq!(
            decide(&other, &[UserRole::Student]),
            AccessDecision::Denied(RedirectTarget::Dashboard)
        );
    }
}
