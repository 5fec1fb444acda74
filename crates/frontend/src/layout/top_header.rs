//! Top navigation bar: brand, catalogue link and the account area.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_auth();

    // Guarded pages redirect on their own once the session is anonymous
    let logout = move |_| {
        spawn_local(async move {
            do_logout(session).await;
        });
    };

    let user_name = move || {
        session.with(|s| s.user().map(|u| u.display_name()).unwrap_or_default())
    };

    view! {
        <header class="top-header">
            <a class="top-header__brand" href="/">
                {icon("courses")}
                <span class="top-header__title">"CourseHub"</span>
            </a>

            <nav class="top-header__nav">
                <a href="/courses">"Courses"</a>
            </nav>

            <div class="top-header__actions">
                {move || if session.with(|s| s.is_authenticated()) {
                    view! {
                        <a class="top-header__link" href="/dashboard">{icon("dashboard")} " Dashboard"</a>
                        <span class="top-header__user">{user_name}</span>
                        <button class="top-header__icon-btn" on:click=logout title="Sign out">
                            {icon("logout")}
                        </button>
                    }
                    .into_any()
                } else if session.with(|s| s.is_loading()) {
                    ().into_any()
                } else {
                    view! {
                        <a class="top-header__link" href="/login">"Sign in"</a>
                        <a class="button button--primary" href="/register">"Get started"</a>
                    }
                    .into_any()
                }}
            </div>
        </header>
    }
}
