use leptos::prelude::*;
use thaw::*;

/// Load failure with a retry button.
#[component]
pub fn ErrorBanner(
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="alert alert--error" role="alert">
            <h3 class="alert__title">{title}</h3>
            <p>{move || message.get()}</p>
            {on_retry.map(|retry| view! {
                <Button appearance=ButtonAppearance::Primary on_click=move |_| retry.run(())>
                    "Try Again"
                </Button>
            })}
        </div>
    }
}

/// Placeholder shown when a list loaded fine but has nothing in it.
#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] hint: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h3>{title}</h3>
            {hint.map(|h| view! { <p class="text-muted">{h}</p> })}
            {children.map(|c| c())}
        </div>
    }
}
