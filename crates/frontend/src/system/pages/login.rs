use contracts::shared::validation::rules::login_rules;
use contracts::shared::validation::{validate, ValidationResult};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use thaw::*;

use super::{clear_on_input, field_error};
use crate::shared::components::form_field::FormField;
use crate::system::auth::context::{do_login, use_auth};

/// Default landing spot after signing in.
const AFTER_LOGIN: &str = "/dashboard";

/// Only same-site paths are honoured for `?next=`.
fn next_target(next: Option<String>) -> String {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| AFTER_LOGIN.to_string())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);
    let errors = RwSignal::new(ValidationResult::valid());
    let submit_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let session = use_auth();
    let query = use_query_map();
    let navigate = use_navigate();

    clear_on_input(email, errors, "email");
    clear_on_input(password, errors, "password");

    // Already signed in: skip the form
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if session.with(|s| s.is_authenticated()) && !submitting.get_untracked() {
                let target = next_target(query.with_untracked(|q| q.get("next")));
                navigate(&target, Default::default());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let values = [("email", email_val.as_str()), ("password", password_val.as_str())];
        let result = validate(&values[..], &login_rules());
        if !result.is_valid {
            errors.set(result);
            return;
        }

        errors.set(ValidationResult::valid());
        submit_error.set(None);
        submitting.set(true);

        let navigate = navigate.clone();
        let remember = remember_me.get_untracked();
        spawn_local(async move {
            match do_login(session, email_val.trim().to_string(), password_val, remember).await {
                Ok(()) => {
                    let target = next_target(query.with_untracked(|q| q.get("next")));
                    navigate(&target, Default::default());
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    submit_error.set(Some(e));
                    submitting.set(false);
                }
            }
        });
    };

    let busy = Signal::derive(move || submitting.get());

    view! {
        <div class="auth-container">
            <div class="auth-box">
                <h1>"Welcome back"</h1>
                <p class="text-muted">"Sign in to continue learning"</p>

                {move || submit_error.get().map(|e| view! {
                    <div class="alert alert--error" role="alert">{e}</div>
                })}

                <form on:submit=on_submit novalidate>
                    <FormField label="Email" error=field_error(errors, "email")>
                        <Input value=email input_type=InputType::Email placeholder="you@example.com" disabled=busy />
                    </FormField>

                    <FormField label="Password" error=field_error(errors, "password")>
                        <Input value=password input_type=InputType::Password disabled=busy />
                    </FormField>

                    <Checkbox checked=remember_me label="Remember me" />

                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=busy
                    >
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </Button>
                </form>

                <p class="auth-footer">
                    "Don't have an account? " <a href="/register">"Create one"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_target() {
        assert_eq!(next_target(None), "/dashboard");
        assert_eq!(next_target(Some("/courses/4".into())), "/courses/4");
        assert_eq!(next_target(Some("https://evil.test".into())), "/dashboard");
        assert_eq!(next_target(Some("//evil.test".into())), "/dashboard");
    }
}
