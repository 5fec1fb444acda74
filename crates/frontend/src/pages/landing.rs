use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::system::auth::context::use_auth;

fn catalogue_search_path(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        "/courses".to_string()
    } else {
        format!("/courses?search={}", urlencoding::encode(query))
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_auth();
    let navigate = use_navigate();
    let search = RwSignal::new(String::new());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        navigate(&catalogue_search_path(&search.get_untracked()), Default::default());
    };

    view! {
        <section class="hero">
            <h1>"Learn from the best teachers, at your own pace"</h1>
            <p class="hero__lead">
                "Browse courses across every level, enroll in a click and keep track of your progress."
            </p>
            <form class="hero__search" on:submit=on_search>
                <Input value=search placeholder="What do you want to learn?" />
                <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit>"Search"</Button>
            </form>
            <Flex gap=FlexGap::Medium justify=FlexJustify::Center>
                <a class="button button--primary" href="/courses">"Explore courses"</a>
                {move || {
                    if session.with(|s| s.is_authenticated()) {
                        view! { <a class="button" href="/dashboard">"Go to dashboard"</a> }.into_any()
                    } else {
                        view! { <a class="button" href="/register">"Join for free"</a> }.into_any()
                    }
                }}
            </Flex>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_search_path() {
        assert_eq!(catalogue_search_path("  "), "/courses");
        assert_eq!(catalogue_search_path("rust basics"), "/courses?search=rust%20basics");
    }
}
