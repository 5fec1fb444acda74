use contracts::system::auth::guard::{decide, AccessDecision};
use contracts::system::auth::UserRole;
use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;
use crate::shared::components::spinner::PageSpinner;

/// Renders `children` only when the session passes the access check.
/// An empty `roles` admits any signed-in user.
#[component]
pub fn PrivateRoute(
    #[prop(optional, into)] roles: Vec<UserRole>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_auth();
    let decision = Memo::new(move |_| session.with(|s| decide(s, &roles)));

    move || match decision.get() {
        AccessDecision::Checking => view! { <PageSpinner /> }.into_any(),
        AccessDecision::Denied(target) => {
            log::debug!("access denied, redirecting to {}", target.path());
            view! { <Redirect path=target.path() /> }.into_any()
        }
        AccessDecision::Allowed => children().into_any(),
    }
}

/// Teacher-only route
#[component]
pub fn TeacherRoute(children: ChildrenFn) -> impl IntoView {
    view! { <PrivateRoute roles=vec![UserRole::Teacher]>{children()}</PrivateRoute> }
}

/// Student-only route
#[component]
pub fn StudentRoute(children: ChildrenFn) -> impl IntoView {
    view! { <PrivateRoute roles=vec![UserRole::Student]>{children()}</PrivateRoute> }
}
