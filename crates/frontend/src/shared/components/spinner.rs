use leptos::prelude::*;
use thaw::*;

/// Neutral waiting indicator for whole-page loads and session checks.
#[component]
pub fn PageSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <Flex gap=FlexGap::Small style="align-items: center; padding: var(--spacing-4xl); justify-content: center;">
            <Spinner />
            {label.map(|l| view! { <span class="text-muted">{l}</span> })}
        </Flex>
    }
}
