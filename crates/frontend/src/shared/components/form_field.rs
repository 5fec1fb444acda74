use leptos::prelude::*;

/// Label, input slot and the field's validation message.
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    #[prop(into)] error: Signal<Option<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--invalid=move || error.get().is_some()>
            <label class="form__label">{label}</label>
            {children()}
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}
