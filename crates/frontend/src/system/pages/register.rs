use contracts::shared::validation::registration::{validate_registration, RegistrationForm};
use contracts::shared::validation::ValidationResult;
use contracts::system::auth::{RegisterRequest, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::{clear_on_input, field_error};
use crate::shared::components::form_field::FormField;
use crate::system::auth::context::{do_register, use_auth};

fn parse_role(value: &str) -> Option<UserRole> {
    match value {
        "student" => Some(UserRole::Student),
        "teacher" => Some(UserRole::Teacher),
        _ => None,
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let role = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);

    let errors = RwSignal::new(ValidationResult::valid());
    let submit_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let session = use_auth();
    let navigate = use_navigate();

    clear_on_input(name, errors, "name");
    clear_on_input(username, errors, "username");
    clear_on_input(email, errors, "email");
    clear_on_input(password, errors, "password");
    clear_on_input(confirm_password, errors, "confirm_password");
    clear_on_input(role, errors, "role");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = RegistrationForm {
            name: name.get_untracked(),
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            role: parse_role(&role.get_untracked()),
            remember_me: remember_me.get_untracked(),
        };
        let result = validate_registration(&form);
        if !result.is_valid {
            errors.set(result);
            return;
        }

        errors.set(ValidationResult::valid());
        submit_error.set(None);
        submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let request = RegisterRequest::from_form(&form);
            match do_register(session, request, form.remember_me).await {
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(e) => {
                    log::warn!("registration failed: {}", e);
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
                <h1>"Create your account"</h1>

                {move || submit_error.get().map(|e| view! {
                    <div class="alert alert--error" role="alert">{e}</div>
                })}

                <form on:submit=on_submit novalidate>
                    <FormField label="Full name" error=field_error(errors, "name")>
                        <Input value=name placeholder="Jane Doe" disabled=busy />
                    </FormField>

                    <FormField label="Username" error=field_error(errors, "username")>
                        <Input value=username placeholder="jane_doe" disabled=busy />
                    </FormField>

                    <FormField label="Email" error=field_error(errors, "email")>
                        <Input value=email input_type=InputType::Email placeholder="you@example.com" disabled=busy />
                    </FormField>

                    <FormField label="Password" error=field_error(errors, "password")>
                        <Input value=password input_type=InputType::Password disabled=busy />
                    </FormField>

                    <FormField label="Confirm password" error=field_error(errors, "confirm_password")>
                        <Input value=confirm_password input_type=InputType::Password disabled=busy />
                    </FormField>

                    <FormField label="I am a" error=field_error(errors, "role")>
                        <Select value=role>
                            <option value="">"Select a role"</option>
                            <option value=UserRole::Student.as_str()>{UserRole::Student.label()}</option>
                            <option value=UserRole::Teacher.as_str()>{UserRole::Teacher.label()}</option>
                        </Select>
                    </FormField>

                    <Checkbox checked=remember_me label="Remember me" />

                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=busy
                    >
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </Button>
                </form>

                <p class="auth-footer">
                    "Already have an account? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("student"), Some(UserRole::Student));
        assert_eq!(parse_role("teacher"), Some(UserRole::Teacher));
        assert_eq!(parse_role(""), None);
        assert_eq!(parse_role("admin"), None);
    }
}
